use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    #[error("news api error: {0}")]
    Api(String),
    #[error("invalid news response: {0}")]
    InvalidResponse(String),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArticleSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Article shape relayed to clients; field names follow the upstream wire
/// format so the mapping is a passthrough.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    pub published_at: String,
    pub source: ArticleSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeed {
    pub articles: Vec<NewsArticle>,
    pub total_results: i64,
}

#[async_trait]
pub trait NewsService: Send + Sync {
    async fn fetch(&self, query: &NewsQuery) -> Result<NewsFeed, NewsServiceError>;
}

mod live;
mod mock;

pub use live::NewsApiService;
pub use mock::MockNewsService;
