use crate::keybindings::KeybindingRegistry;
use crate::news::{Article, FeedLoader, FeedOutcome, FeedState, LatestView, LoadTask};
use crate::parallax::{PageSurface, ParallaxSynchronizer, RegionHandle};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// How long a status bar message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(4);

// ============================================================================
// Event Types
// ============================================================================

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// Both feed requests finished.
    ///
    /// Fields:
    /// - `generation`: mount generation the load was spawned for
    /// - `outcome`: per-feed results
    FeedsLoaded {
        generation: u64,
        outcome: FeedOutcome,
    },
    /// A background task panicked.
    ///
    /// Fields:
    /// - `generation`: mount generation the task was spawned for
    /// - `task`: Name of the task that panicked (e.g., "feed_load")
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked {
        generation: u64,
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// State of the Brief page.
///
/// The page has a mount lifecycle: [`mount`](Self::mount) starts the feed load
/// and attaches the parallax listener, [`unmount`](Self::unmount) cancels the
/// load and detaches the listener. [`remount`](Self::remount) is a reload.
pub struct App {
    loader: Arc<FeedLoader>,
    load_task: Option<LoadTask>,
    parallax: Option<ParallaxSynchronizer>,

    /// Current mount generation; results from older generations are dropped.
    pub generation: u64,
    pub feeds: FeedState,
    /// True while a load is in flight for the current generation.
    pub loading: bool,

    /// Scroll position and layer translations of the page.
    pub surface: PageSurface,
    /// Index into [`links`](Self::links) of the highlighted "Read more" link.
    pub selected_link: Option<usize>,
    /// Page row of each link, in [`links`](Self::links) order. Set by the renderer.
    pub link_rows: Vec<usize>,
    /// Height of the content region at the last draw.
    pub viewport_rows: usize,

    pub theme: ThemeVariant,
    style_map: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub status_message: Option<(String, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(loader: Arc<FeedLoader>, theme: ThemeVariant) -> Self {
        Self {
            loader,
            load_task: None,
            parallax: None,
            generation: 0,
            feeds: FeedState::default(),
            loading: false,
            surface: PageSurface::new(),
            selected_link: None,
            link_rows: Vec::new(),
            viewport_rows: 0,
            theme,
            style_map: StyleMap::from(theme),
            keybindings: KeybindingRegistry::new(),
            status_message: None,
            needs_redraw: true,
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Shows the page: starts the feed load and attaches the parallax listener.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.generation = self.generation.wrapping_add(1);
        self.feeds = FeedState::default();
        self.selected_link = None;
        self.link_rows.clear();

        self.surface.mount_layers();
        self.parallax = Some(ParallaxSynchronizer::attach(
            &mut self.surface,
            RegionHandle::ScreenContent,
        ));

        self.loading = self.loader.has_api_key();
        self.load_task = Some(Arc::clone(&self.loader).spawn(self.generation, event_tx.clone()));
        self.needs_redraw = true;

        tracing::debug!(generation = self.generation, "Page mounted");
    }

    /// Tears the page down: cancels any in-flight load and detaches the listener.
    pub fn unmount(&mut self) {
        if let Some(task) = self.load_task.take() {
            if !task.is_finished() {
                task.cancel();
                tracing::debug!(generation = self.generation, "Cancelled in-flight feed load");
            }
        }
        if let Some(mut sync) = self.parallax.take() {
            sync.detach(&mut self.surface);
        }
        self.surface.unmount_layers();
        self.loading = false;
    }

    /// Reloads the page from scratch.
    pub fn remount(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.unmount();
        self.mount(event_tx);
    }

    pub fn is_mounted(&self) -> bool {
        self.parallax.as_ref().is_some_and(ParallaxSynchronizer::is_attached)
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.is_mounted()
    }

    /// Publishes a finished load. Returns `false` for stale results.
    pub fn apply_feeds(&mut self, generation: u64, outcome: FeedOutcome) -> bool {
        if !self.is_current(generation) {
            tracing::debug!(
                generation,
                current = self.generation,
                "Ignoring stale feed results"
            );
            return false;
        }

        self.feeds.apply(outcome);
        self.loading = false;
        self.load_task = None;
        self.clamp_selection();
        self.needs_redraw = true;
        true
    }

    /// Marks the load of `generation` as failed (e.g. the loader task panicked).
    /// Returns `false` if that load belongs to an earlier mount.
    pub fn fail_load(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            tracing::debug!(
                generation,
                current = self.generation,
                "Ignoring failure from stale feed load"
            );
            return false;
        }

        self.feeds.fail();
        self.loading = false;
        self.load_task = None;
        self.clamp_selection();
        self.needs_redraw = true;
        true
    }

    // ------------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------------

    /// Articles whose "Read more" link is on screen, in page order.
    ///
    /// Trending always contributes; Latest News only when no error replaces it.
    pub fn links(&self) -> Vec<&Article> {
        let latest: &[Article] = match self.feeds.latest_view() {
            LatestView::Grid(items) => items,
            LatestView::Error(_) | LatestView::Empty => &[],
        };
        self.feeds.trending.iter().chain(latest.iter()).collect()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.selected_link.and_then(|i| self.links().get(i).copied())
    }

    pub fn select_next_link(&mut self) {
        let count = self.links().len();
        if count == 0 {
            self.selected_link = None;
            return;
        }
        self.selected_link = Some(match self.selected_link {
            Some(i) => (i + 1) % count,
            None => 0,
        });
        self.scroll_to_selected();
    }

    pub fn select_prev_link(&mut self) {
        let count = self.links().len();
        if count == 0 {
            self.selected_link = None;
            return;
        }
        self.selected_link = Some(match self.selected_link {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
        self.scroll_to_selected();
    }

    fn clamp_selection(&mut self) {
        let count = self.links().len();
        self.selected_link = match self.selected_link {
            Some(_) if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    /// Scrolls so the selected link's row is near the top of the viewport.
    fn scroll_to_selected(&mut self) {
        if let Some(row) = self.selected_link.and_then(|i| self.link_rows.get(i).copied()) {
            self.surface.scroll_to(PageSurface::scroll_for_row(row));
        }
    }

    // ------------------------------------------------------------------------
    // Theme and status
    // ------------------------------------------------------------------------

    pub fn style(&self, role: &str) -> Style {
        self.style_map.resolve(role)
    }

    pub fn style_map(&self) -> &StyleMap {
        &self.style_map
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.style_map = StyleMap::from(self.theme);
        self.set_status(format!("Theme: {}", self.theme.name()));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clears the status message once it has expired. Returns true if cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, set_at)) if set_at.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }
}
