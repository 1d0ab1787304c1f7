use core::fmt;

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::responses::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Tiktok,
    Youtube,
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Twitter
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    #[default]
    Feed,
    User,
    Hashtag,
    Search,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialQuery {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default, rename = "type")]
    pub kind: FeedKind,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    pub platform: Platform,
    pub author: PostAuthor,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialFeed {
    pub posts: Vec<SocialPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Placeholder marker until real platform integrations land.
    #[serde(rename = "_note")]
    pub note: String,
}

// GET /api/social?platform=twitter&type=feed&limit=10
pub async fn social_feed(Query(query): Query<SocialQuery>) -> Json<SocialFeed> {
    Json(mock_feed(&query))
}

// POST /api/social (body for more complex queries)
pub async fn social_search(body: axum::body::Bytes) -> Result<Json<SocialFeed>, ApiError> {
    let query: SocialQuery = serde_json::from_slice(&body)
        .map_err(|_| ApiError::Validation("Invalid request body".into()))?;
    Ok(Json(mock_feed(&query)))
}

// Placeholder until per-platform API integrations exist (Twitter API v2,
// Instagram Graph API, TikTok API, YouTube Data API v3). Returns one post in
// the unified shape clients are expected to consume.
fn mock_feed(query: &SocialQuery) -> SocialFeed {
    info!(
        platform = %query.platform,
        kind = ?query.kind,
        query = ?query.query,
        limit = ?query.limit,
        "social media request served with mock data"
    );

    let post = SocialPost {
        id: "mock-1".into(),
        platform: query.platform,
        author: PostAuthor {
            username: "example_user".into(),
            display_name: "Example User".into(),
            avatar_url: Some("https://via.placeholder.com/48".into()),
        },
        content: "This is a placeholder post. Implement actual API integration.".into(),
        media_urls: None,
        likes: 42,
        comments: 5,
        shares: 3,
        created_at: OffsetDateTime::now_utc(),
        url: format!("https://{}.com/example_user/status/123", query.platform),
    };

    SocialFeed {
        posts: vec![post],
        next_cursor: None,
        note: "This is mock data. Implement platform-specific API integration.".into(),
    }
}
