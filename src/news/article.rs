use serde::{Deserialize, Deserializer};

/// A single news item as returned by the news API.
///
/// Only `title`, `url` and `urlToImage` drive behaviour. The remaining fields
/// are secondary text for the page and may be absent. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Link to the full story.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 timestamp, kept verbatim.
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response envelope shared by both endpoints.
///
/// `articles` is required: a 2xx body without it is treated as a parse failure.
#[derive(Debug, Deserialize)]
pub(crate) struct NewsResponse {
    pub articles: Vec<Article>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Article {
    /// True when `urlToImage` is present and non-empty.
    pub fn has_image(&self) -> bool {
        self.url_to_image.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Publisher name, if the API supplied one.
    pub fn source_name(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Date part (`YYYY-MM-DD`) of `publishedAt`.
    pub fn published_date(&self) -> Option<&str> {
        self.published_at
            .as_deref()
            .map(|ts| ts.get(..10).unwrap_or(ts))
            .filter(|d| !d.is_empty())
    }
}

/// Keeps only articles with a usable image, preserving API order.
pub fn filter_with_images(articles: Vec<Article>) -> Vec<Article> {
    articles.into_iter().filter(Article::has_image).collect()
}
