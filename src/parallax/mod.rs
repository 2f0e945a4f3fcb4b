//! Scroll-synchronized parallax effect.
//!
//! The synchronizer never touches a renderer directly. It talks to a
//! [`ScrollSurface`]: something that can deliver scroll events for a region
//! and move layers vertically. The terminal page implements it in
//! [`PageSurface`]; tests use a recording fake.
//!
//! Each scroll event recomputes the translation from the absolute offset:
//! `offset * -0.1`, applied to both the decorative backdrop and the content
//! region. No easing, batching or clamping.

mod page;

pub use page::PageSurface;

/// Multiplier from scroll offset to layer translation.
pub const PARALLAX_FACTOR: f64 = -0.1;

/// A layer the synchronizer can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementHandle {
    /// Decorative layer behind the page.
    Backdrop,
    /// The scrollable content region itself.
    ScreenContent,
}

/// A region that emits scroll events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionHandle {
    ScreenContent,
}

/// Identifies a registered scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Receives layer translations.
pub trait TransformTarget {
    /// Sets the vertical translation of `element` in pixels (rows in the terminal).
    ///
    /// Returns `false` when the element is not mounted; the update is skipped.
    fn apply_transform(&mut self, element: ElementHandle, offset_px: f64) -> bool;
}

/// Called with the absolute scroll offset on every scroll event.
pub type ScrollCallback = Box<dyn FnMut(f64, &mut dyn TransformTarget) + Send>;

/// Capability interface over a rendering surface.
pub trait ScrollSurface {
    /// Registers `callback` for scroll events on `region`.
    fn observe_scroll(&mut self, region: RegionHandle, callback: ScrollCallback) -> ListenerId;

    /// Removes a listener. Returns `false` if it was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// Vertical translation for a scroll offset.
pub fn parallax_offset(scroll_top: f64) -> f64 {
    scroll_top * PARALLAX_FACTOR
}

/// Mirrors a damped translation of the scroll offset onto the backdrop and
/// the content region while attached.
#[derive(Debug, Default)]
pub struct ParallaxSynchronizer {
    listener: Option<ListenerId>,
}

impl ParallaxSynchronizer {
    /// Layers moved on every scroll event, in update order.
    pub const TARGETS: [ElementHandle; 2] = [ElementHandle::Backdrop, ElementHandle::ScreenContent];

    /// Attaches a scroll listener to `region`.
    pub fn attach<S: ScrollSurface + ?Sized>(surface: &mut S, region: RegionHandle) -> Self {
        let id = surface.observe_scroll(
            region,
            Box::new(|scroll_top: f64, target: &mut dyn TransformTarget| {
                let offset = parallax_offset(scroll_top);
                for element in Self::TARGETS {
                    if !target.apply_transform(element, offset) {
                        tracing::trace!(?element, "Parallax target not mounted, skipping");
                    }
                }
            }),
        );
        tracing::debug!(listener = id.0, ?region, "Parallax listener attached");
        Self { listener: Some(id) }
    }

    /// Removes the listener. Further scroll events leave the layers untouched.
    pub fn detach<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(id) = self.listener.take() {
            if surface.remove_listener(id) {
                tracing::debug!(listener = id.0, "Parallax listener detached");
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Records every transform; elements listed in `unmounted` refuse updates.
    #[derive(Default)]
    struct RecordingTarget {
        calls: Vec<(ElementHandle, f64)>,
        unmounted: Vec<ElementHandle>,
    }

    impl TransformTarget for RecordingTarget {
        fn apply_transform(&mut self, element: ElementHandle, offset_px: f64) -> bool {
            if self.unmounted.contains(&element) {
                return false;
            }
            self.calls.push((element, offset_px));
            true
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        listeners: HashMap<ListenerId, (RegionHandle, ScrollCallback)>,
        next_id: u64,
        target: RecordingTarget,
    }

    impl FakeSurface {
        fn scroll(&mut self, region: RegionHandle, top: f64) {
            for (r, callback) in self.listeners.values_mut() {
                if *r == region {
                    callback(top, &mut self.target);
                }
            }
        }
    }

    impl ScrollSurface for FakeSurface {
        fn observe_scroll(&mut self, region: RegionHandle, callback: ScrollCallback) -> ListenerId {
            self.next_id += 1;
            let id = ListenerId(self.next_id);
            self.listeners.insert(id, (region, callback));
            id
        }

        fn remove_listener(&mut self, id: ListenerId) -> bool {
            self.listeners.remove(&id).is_some()
        }
    }

    #[test]
    fn test_offset_100_translates_both_targets_by_minus_10() {
        let mut surface = FakeSurface::default();
        let _sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);

        surface.scroll(RegionHandle::ScreenContent, 100.0);

        assert_eq!(
            surface.target.calls,
            vec![
                (ElementHandle::Backdrop, -10.0),
                (ElementHandle::ScreenContent, -10.0)
            ]
        );
    }

    #[test]
    fn test_offset_zero_translates_to_zero() {
        let mut surface = FakeSurface::default();
        let _sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);

        surface.scroll(RegionHandle::ScreenContent, 0.0);

        assert_eq!(surface.target.calls.len(), 2);
        assert!(surface.target.calls.iter().all(|(_, y)| *y == 0.0));
    }

    #[test]
    fn test_each_event_uses_absolute_offset() {
        let mut surface = FakeSurface::default();
        let _sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);

        surface.scroll(RegionHandle::ScreenContent, 50.0);
        surface.scroll(RegionHandle::ScreenContent, 20.0);

        let last: Vec<f64> = surface.target.calls[2..].iter().map(|(_, y)| *y).collect();
        assert_eq!(last, vec![-2.0, -2.0]);
    }

    #[test]
    fn test_detach_stops_transforms() {
        let mut surface = FakeSurface::default();
        let mut sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);
        assert!(sync.is_attached());

        sync.detach(&mut surface);
        assert!(!sync.is_attached());
        assert!(surface.listeners.is_empty());

        surface.scroll(RegionHandle::ScreenContent, 100.0);
        assert!(surface.target.calls.is_empty());
    }

    #[test]
    fn test_detach_twice_is_noop() {
        let mut surface = FakeSurface::default();
        let mut sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);
        sync.detach(&mut surface);
        sync.detach(&mut surface);
        assert!(surface.listeners.is_empty());
    }

    #[test]
    fn test_unmounted_target_is_skipped() {
        let mut surface = FakeSurface::default();
        surface.target.unmounted.push(ElementHandle::Backdrop);
        let _sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);

        surface.scroll(RegionHandle::ScreenContent, 30.0);

        assert_eq!(
            surface.target.calls,
            vec![(ElementHandle::ScreenContent, -3.0)]
        );
    }

    #[test]
    fn test_parallax_offset() {
        assert_eq!(parallax_offset(100.0), -10.0);
        assert_eq!(parallax_offset(0.0), 0.0);
        assert_eq!(parallax_offset(250.0), -25.0);
    }
}
