use super::{
    parallax_offset, ElementHandle, ListenerId, RegionHandle, ScrollCallback, ScrollSurface,
    TransformTarget,
};

/// Vertical translation of the page layers. `None` means the layer is not mounted.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct PageLayers {
    backdrop: Option<f64>,
    content: Option<f64>,
}

impl PageLayers {
    fn get(&self, element: ElementHandle) -> Option<f64> {
        match element {
            ElementHandle::Backdrop => self.backdrop,
            ElementHandle::ScreenContent => self.content,
        }
    }

    fn slot(&mut self, element: ElementHandle) -> &mut Option<f64> {
        match element {
            ElementHandle::Backdrop => &mut self.backdrop,
            ElementHandle::ScreenContent => &mut self.content,
        }
    }
}

impl TransformTarget for PageLayers {
    fn apply_transform(&mut self, element: ElementHandle, offset_px: f64) -> bool {
        match self.slot(element) {
            Some(y) => {
                *y = offset_px;
                true
            }
            None => false,
        }
    }
}

struct Listener {
    id: ListenerId,
    region: RegionHandle,
    callback: ScrollCallback,
}

/// The terminal page as a scroll surface.
///
/// Holds the scroll position of the content region (in rows) and the current
/// translation of each layer. Scroll events fire only when the position
/// actually changes.
pub struct PageSurface {
    scroll_top: usize,
    max_scroll: usize,
    layers: PageLayers,
    listeners: Vec<Listener>,
    next_id: u64,
}

impl Default for PageSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface {
    /// A surface with both layers unmounted and no scroll limit.
    pub fn new() -> Self {
        Self {
            scroll_top: 0,
            max_scroll: usize::MAX,
            layers: PageLayers::default(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Mounts both layers at zero translation.
    pub fn mount_layers(&mut self) {
        self.layers = PageLayers {
            backdrop: Some(0.0),
            content: Some(0.0),
        };
    }

    /// Unmounts both layers and resets the scroll position.
    pub fn unmount_layers(&mut self) {
        self.layers = PageLayers::default();
        self.scroll_top = 0;
    }

    pub fn is_mounted(&self, element: ElementHandle) -> bool {
        self.layers.get(element).is_some()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn max_scroll(&self) -> usize {
        self.max_scroll
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Current translation of `element`, 0 when unmounted.
    pub fn translation(&self, element: ElementHandle) -> f64 {
        self.layers.get(element).unwrap_or(0.0)
    }

    /// Translation rounded to whole terminal rows, as a non-negative upward shift.
    pub fn shift_rows(&self, element: ElementHandle) -> usize {
        let rows = (-self.translation(element)).round();
        if rows > 0.0 {
            rows as usize
        } else {
            0
        }
    }

    /// First page row visible in the content region: scroll position plus the
    /// content layer's own upward shift.
    pub fn first_visible_row(&self) -> usize {
        self.scroll_top
            .saturating_add(self.shift_rows(ElementHandle::ScreenContent))
    }

    /// Largest scroll position that keeps the last page row reachable.
    ///
    /// The content layer moves up by a tenth of the scroll position on top of
    /// the scroll itself, so the limit is `(rows - viewport) / 1.1` rounded up.
    pub fn scroll_limit(total_rows: usize, viewport_rows: usize) -> usize {
        let overflow = total_rows.saturating_sub(viewport_rows) as f64;
        (overflow / (1.0 - super::PARALLAX_FACTOR)).ceil() as usize
    }

    /// Scroll position that brings `row` near the top of the viewport.
    pub fn scroll_for_row(row: usize) -> usize {
        (row.saturating_sub(1) as f64 / (1.0 - super::PARALLAX_FACTOR)).floor() as usize
    }

    /// Updates the scroll limit, clamping the current position if needed.
    pub fn set_max_scroll(&mut self, max_scroll: usize) {
        self.max_scroll = max_scroll;
        if self.scroll_top > max_scroll {
            self.scroll_top = max_scroll;
            self.dispatch(RegionHandle::ScreenContent);
        }
    }

    /// Scrolls the content region to an absolute row and fires a scroll event.
    pub fn scroll_to(&mut self, top: usize) {
        let top = top.min(self.max_scroll);
        if top == self.scroll_top {
            return;
        }
        self.scroll_top = top;
        self.dispatch(RegionHandle::ScreenContent);
    }

    /// Scrolls by a signed number of rows.
    pub fn scroll_by(&mut self, delta: isize) {
        let top = if delta.is_negative() {
            self.scroll_top.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_top.saturating_add(delta as usize)
        };
        self.scroll_to(top);
    }

    fn dispatch(&mut self, region: RegionHandle) {
        let top = self.scroll_top as f64;
        for listener in self.listeners.iter_mut().filter(|l| l.region == region) {
            (listener.callback)(top, &mut self.layers);
        }
        tracing::trace!(
            scroll_top = self.scroll_top,
            offset = parallax_offset(top),
            listeners = self.listeners.len(),
            "Scroll event"
        );
    }
}

impl ScrollSurface for PageSurface {
    fn observe_scroll(&mut self, region: RegionHandle, callback: ScrollCallback) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            region,
            callback,
        });
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }
}

impl TransformTarget for PageSurface {
    fn apply_transform(&mut self, element: ElementHandle, offset_px: f64) -> bool {
        self.layers.apply_transform(element, offset_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallax::ParallaxSynchronizer;

    fn mounted_surface() -> (PageSurface, ParallaxSynchronizer) {
        let mut surface = PageSurface::new();
        surface.mount_layers();
        let sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);
        (surface, sync)
    }

    #[test]
    fn test_scroll_100_moves_layers_up_10() {
        let (mut surface, _sync) = mounted_surface();
        surface.scroll_to(100);

        assert_eq!(surface.translation(ElementHandle::Backdrop), -10.0);
        assert_eq!(surface.translation(ElementHandle::ScreenContent), -10.0);
        assert_eq!(surface.shift_rows(ElementHandle::Backdrop), 10);
        assert_eq!(surface.first_visible_row(), 110);
    }

    #[test]
    fn test_scroll_back_to_zero() {
        let (mut surface, _sync) = mounted_surface();
        surface.scroll_to(40);
        surface.scroll_to(0);

        assert_eq!(surface.translation(ElementHandle::Backdrop), 0.0);
        assert_eq!(surface.first_visible_row(), 0);
    }

    #[test]
    fn test_scroll_by_saturates() {
        let (mut surface, _sync) = mounted_surface();
        surface.scroll_by(-5);
        assert_eq!(surface.scroll_top(), 0);
        surface.scroll_by(30);
        surface.scroll_by(-10);
        assert_eq!(surface.scroll_top(), 20);
        assert_eq!(surface.translation(ElementHandle::ScreenContent), -2.0);
    }

    #[test]
    fn test_clamped_to_max_scroll() {
        let (mut surface, _sync) = mounted_surface();
        surface.set_max_scroll(50);
        surface.scroll_to(80);
        assert_eq!(surface.scroll_top(), 50);
        assert_eq!(surface.translation(ElementHandle::Backdrop), -5.0);

        surface.set_max_scroll(30);
        assert_eq!(surface.scroll_top(), 30);
        assert_eq!(surface.translation(ElementHandle::Backdrop), -3.0);
    }

    #[test]
    fn test_detached_listener_leaves_layers_alone() {
        let (mut surface, mut sync) = mounted_surface();
        surface.scroll_to(20);
        sync.detach(&mut surface);
        assert_eq!(surface.listener_count(), 0);

        surface.scroll_to(90);
        assert_eq!(surface.translation(ElementHandle::Backdrop), -2.0);
    }

    #[test]
    fn test_unmounted_layers_not_updated() {
        let mut surface = PageSurface::new();
        let _sync = ParallaxSynchronizer::attach(&mut surface, RegionHandle::ScreenContent);
        surface.scroll_to(100);

        assert!(!surface.is_mounted(ElementHandle::Backdrop));
        assert_eq!(surface.translation(ElementHandle::Backdrop), 0.0);
    }

    #[test]
    fn test_scroll_limit_accounts_for_content_shift() {
        assert_eq!(PageSurface::scroll_limit(20, 30), 0);
        assert_eq!(PageSurface::scroll_limit(141, 30), 101);
        // At the limit the last row is still inside the viewport
        let (mut surface, _sync) = mounted_surface();
        surface.set_max_scroll(PageSurface::scroll_limit(141, 30));
        surface.scroll_to(usize::MAX);
        assert!(surface.first_visible_row() + 30 >= 141);
    }

    #[test]
    fn test_scroll_for_row() {
        assert_eq!(PageSurface::scroll_for_row(0), 0);
        assert_eq!(PageSurface::scroll_for_row(1), 0);
        assert_eq!(PageSurface::scroll_for_row(2), 0);
        assert_eq!(PageSurface::scroll_for_row(30), 26);
    }
}
