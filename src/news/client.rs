use crate::config::Config;
use crate::news::article::{filter_with_images, Article, NewsResponse};
use crate::news::FeedKind;
use futures::StreamExt;
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Errors from a single news request.
///
/// Every variant maps to the same user-facing message in the loader; the
/// detail here is for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Body was not the expected JSON envelope
    #[error("Invalid JSON in response: {0}")]
    Parse(#[from] serde_json::Error),
    /// Response body exceeded the 5MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Base URL from configuration could not be combined with the endpoint path
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Builds the shared HTTP client.
///
/// Redirects are capped at 3 hops with loop detection. The news API rejects
/// requests without a User-Agent, so one is always set.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("brief/", env!("CARGO_PKG_VERSION")))
        .redirect(redirect_policy())
        .build()
}

fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev == url) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            to = %url.path(),
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );
        attempt.follow()
    })
}

/// Typed client for the two news endpoints.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
    country: String,
    trending_query: String,
    timeout: Option<Duration>,
}

impl NewsClient {
    /// Creates a client from configuration.
    ///
    /// The base URL is validated up front so a typo in config.toml fails at
    /// startup instead of on every request.
    pub fn from_config(http: reqwest::Client, config: &Config) -> Result<Self, FetchError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        Ok(Self {
            http,
            base_url,
            language: config.language.clone(),
            country: config.country.clone(),
            trending_query: config.trending_query.clone(),
            timeout: (config.request_timeout_secs > 0)
                .then(|| Duration::from_secs(config.request_timeout_secs)),
        })
    }

    /// Full request URL for `kind`, including the API key.
    ///
    /// The result contains the key and must not be logged.
    fn endpoint_url(&self, kind: FeedKind, api_key: &SecretString) -> Result<Url, FetchError> {
        let endpoint = format!("{}/{}", self.base_url, kind.path());
        let key = api_key.expose_secret();
        let url = match kind {
            FeedKind::Latest => Url::parse_with_params(
                &endpoint,
                [
                    ("language", self.language.as_str()),
                    ("country", self.country.as_str()),
                    ("apiKey", key),
                ],
            )?,
            FeedKind::Trending => Url::parse_with_params(
                &endpoint,
                [("q", self.trending_query.as_str()), ("apiKey", key)],
            )?,
        };
        Ok(url)
    }

    /// Fetches one feed and returns only the articles with an image.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] - Connection or TLS errors
    /// - [`FetchError::Timeout`] - Request exceeded the configured timeout
    /// - [`FetchError::HttpStatus`] - Non-2xx HTTP response (checked before parsing)
    /// - [`FetchError::ResponseTooLarge`] - Response exceeded 5MB
    /// - [`FetchError::Parse`] - Body is not JSON or lacks `articles`
    pub async fn fetch(
        &self,
        kind: FeedKind,
        api_key: &SecretString,
    ) -> Result<Vec<Article>, FetchError> {
        let url = self.endpoint_url(kind, api_key)?;
        tracing::debug!(feed = kind.label(), endpoint = kind.path(), "Requesting news feed");

        let send = self.http.get(url).send();
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| FetchError::Timeout(limit.as_secs()))?,
            None => send.await,
        }
        .map_err(FetchError::Network)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        let body: NewsResponse = serde_json::from_slice(&bytes)?;

        let received = body.articles.len();
        let articles = filter_with_images(body.articles);
        tracing::debug!(
            feed = kind.label(),
            received,
            kept = articles.len(),
            "Filtered articles without images"
        );

        Ok(articles)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
