use crate::app::AppEvent;
use crate::news::client::{FetchError, NewsClient};
use crate::news::{Article, FeedKind};
use crate::util::catch_task_panic;
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// User-facing message shown in place of the Latest News grid when any fetch fails.
pub const FEED_ERROR_MESSAGE: &str = "Failed to load news. Please try again later.";

/// Result of one load: each feed succeeds or fails on its own.
#[derive(Debug)]
pub struct FeedOutcome {
    pub latest: Result<Vec<Article>, FetchError>,
    pub trending: Result<Vec<Article>, FetchError>,
}

impl FeedOutcome {
    /// True if either request failed.
    pub fn has_failure(&self) -> bool {
        self.latest.is_err() || self.trending.is_err()
    }
}

/// Feed data held by the mounted page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    /// "Latest News" list, API order.
    pub latest: Vec<Article>,
    /// "Trending News" list, API order.
    pub trending: Vec<Article>,
    /// Shared error message. Only gates the Latest News section.
    pub error: Option<String>,
}

/// What the Latest News section should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestView<'a> {
    Error(&'a str),
    Empty,
    Grid(&'a [Article]),
}

impl FeedState {
    /// Publishes a load outcome.
    ///
    /// A successful feed replaces its list. Any failure sets the shared error
    /// message; the other feed's list is still published.
    pub fn apply(&mut self, outcome: FeedOutcome) {
        match outcome.latest {
            Ok(articles) => self.latest = articles,
            Err(_) => self.error = Some(FEED_ERROR_MESSAGE.to_string()),
        }
        match outcome.trending {
            Ok(articles) => self.trending = articles,
            Err(_) => self.error = Some(FEED_ERROR_MESSAGE.to_string()),
        }
    }

    /// Marks the load as failed without touching either list.
    pub fn fail(&mut self) {
        self.error = Some(FEED_ERROR_MESSAGE.to_string());
    }

    pub fn latest_view(&self) -> LatestView<'_> {
        if let Some(error) = &self.error {
            LatestView::Error(error)
        } else if self.latest.is_empty() {
            LatestView::Empty
        } else {
            LatestView::Grid(&self.latest)
        }
    }
}

/// Loads both feeds for one mount of the page.
///
/// The API key is injected here rather than read from the environment, so
/// tests can construct loaders with fixture keys or none at all.
pub struct FeedLoader {
    client: NewsClient,
    api_key: Option<SecretString>,
}

impl FeedLoader {
    /// Creates a loader. A blank key is treated as missing.
    pub fn new(client: NewsClient, api_key: Option<SecretString>) -> Self {
        let api_key = api_key.filter(|k| !k.expose_secret().trim().is_empty());
        Self { client, api_key }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches both feeds concurrently.
    ///
    /// Returns `None` without touching the network when no API key is
    /// configured. That case is logged only and never shown to the user.
    pub async fn load(&self) -> Option<FeedOutcome> {
        let Some(api_key) = self.api_key.as_ref() else {
            tracing::error!(
                "News API key is undefined; set NEWS_API_KEY or api_key in config.toml"
            );
            return None;
        };

        let (latest, trending) = tokio::join!(
            self.client.fetch(FeedKind::Latest, api_key),
            self.client.fetch(FeedKind::Trending, api_key),
        );

        for (kind, result) in [(FeedKind::Latest, &latest), (FeedKind::Trending, &trending)] {
            match result {
                Ok(articles) => {
                    tracing::info!(feed = kind.label(), articles = articles.len(), "Feed loaded")
                }
                Err(e) => tracing::warn!(feed = kind.label(), error = %e, "Error fetching news"),
            }
        }

        Some(FeedOutcome { latest, trending })
    }

    /// Spawns [`load`](Self::load) as a background task.
    ///
    /// The outcome is sent as `AppEvent::FeedsLoaded` tagged with `generation`.
    /// Nothing is sent when there is no API key, or when the returned
    /// [`LoadTask`] was cancelled before the results were ready.
    pub fn spawn(self: Arc<Self>, generation: u64, event_tx: mpsc::Sender<AppEvent>) -> LoadTask {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = tokio::spawn(async move {
            let event = match catch_task_panic(self.load()).await {
                Ok(Some(outcome)) => AppEvent::FeedsLoaded {
                    generation,
                    outcome,
                },
                Ok(None) => return,
                Err(error) => AppEvent::TaskPanicked {
                    generation,
                    task: "feed_load",
                    error,
                },
            };

            if flag.load(Ordering::Acquire) {
                tracing::debug!(generation, "Feed load cancelled, discarding results");
                return;
            }

            if let Err(e) = event_tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send feed results (receiver dropped)");
            }
        });

        LoadTask { cancelled, handle }
    }
}

/// Handle to an in-flight feed load.
///
/// Dropping the handle cancels the load, so replacing or discarding it on
/// teardown suppresses any late publication.
pub struct LoadTask {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl LoadTask {
    /// Cancels the load. Results not yet published are discarded.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            self.cancel();
        }
    }
}
