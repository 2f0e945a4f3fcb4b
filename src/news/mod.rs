//! News feeds: article model, HTTP client and the feed loader.
//!
//! - [`article`] - `Article` deserialization and the image-presence filter
//! - [`client`] - requests against the two news API endpoints
//! - [`loader`] - concurrent, cancellable loading of both feeds into view state
//!
//! # Example
//!
//! ```ignore
//! use brief::news::{http_client, FeedLoader, FeedState, NewsClient};
//!
//! let client = NewsClient::from_config(http_client()?, &config)?;
//! let loader = FeedLoader::new(client, config.resolve_api_key(None));
//!
//! let mut state = FeedState::default();
//! if let Some(outcome) = loader.load().await {
//!     state.apply(outcome);
//! }
//! ```

mod article;
mod client;
mod loader;

pub use article::{filter_with_images, Article, Source};
pub use client::{http_client, FetchError, NewsClient};
pub use loader::{FeedLoader, FeedOutcome, FeedState, LatestView, LoadTask, FEED_ERROR_MESSAGE};

/// The two independently loaded feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Top headlines, shown as the "Latest News" grid.
    Latest,
    /// Keyword search, shown as the "Trending News" list.
    Trending,
}

impl FeedKind {
    /// Section heading for this feed.
    pub fn label(self) -> &'static str {
        match self {
            Self::Latest => "Latest News",
            Self::Trending => "Trending News",
        }
    }

    /// Endpoint path relative to the API base URL.
    pub(crate) fn path(self) -> &'static str {
        match self {
            Self::Latest => "top-headlines",
            Self::Trending => "everything",
        }
    }
}
