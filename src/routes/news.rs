use axum::extract::{Query, State};
use axum::Json;
use tracing::error;

use crate::responses::ApiError;
use crate::services::news::{NewsFeed, NewsQuery};
use crate::state::AppState;

// GET /api/news?category=technology&limit=10
pub async fn news_headlines(
    State(app_state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsFeed>, ApiError> {
    fetch_news(&app_state, query).await.map(Json)
}

// POST /api/news (body for more complex queries; an empty or unreadable body
// falls back to the default query, matching the GET behavior)
pub async fn news_search(
    State(app_state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<NewsFeed>, ApiError> {
    let query: NewsQuery = serde_json::from_slice(&body).unwrap_or_default();
    fetch_news(&app_state, query).await.map(Json)
}

async fn fetch_news(app_state: &AppState, query: NewsQuery) -> Result<NewsFeed, ApiError> {
    let news = app_state
        .news
        .as_ref()
        .ok_or(ApiError::NotConfigured("News service"))?;

    match news.fetch(&query).await {
        Ok(feed) => Ok(feed),
        Err(err) => {
            error!(?err, "newsapi request failed");
            Err(ApiError::Upstream("Failed to fetch news".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::mock_db::MockDb;
    use crate::services::news::{MockNewsService, NewsService};
    use axum::body::Bytes;
    use serde_json::json;
    use std::sync::Arc;

    fn stub_state(news: Option<Arc<MockNewsService>>) -> AppState {
        let db = Arc::new(MockDb::default());
        let news: Option<Arc<dyn NewsService>> = match news {
            Some(svc) => Some(svc),
            None => None,
        };
        AppState {
            subscriptions: db.clone(),
            profiles: db,
            ai: None,
            speech: None,
            news,
            http_client: Arc::new(reqwest::Client::new()),
            config: Arc::new(Config {
                database_url: "postgres://localhost".into(),
                frontend_origin: None,
                openai_api_key: None,
                elevenlabs_api_key: None,
                news_api_key: None,
                revenuecat_webhook_secret: None,
            }),
        }
    }

    #[tokio::test]
    async fn get_forwards_query_params() {
        let news = Arc::new(MockNewsService::new());
        let state = stub_state(Some(news.clone()));

        let query = NewsQuery {
            category: Some("technology".into()),
            limit: Some(5),
            ..NewsQuery::default()
        };
        let feed = news_headlines(State(state), Query(query)).await.unwrap();
        assert_eq!(feed.0.total_results, 1);

        let captured = news.queries.lock().unwrap();
        assert_eq!(captured[0].category.as_deref(), Some("technology"));
        assert_eq!(captured[0].limit, Some(5));
    }

    #[tokio::test]
    async fn post_parses_body_into_query() {
        let news = Arc::new(MockNewsService::new());
        let state = stub_state(Some(news.clone()));

        let body = Bytes::from(
            serde_json::to_vec(&json!({ "q": "rust", "country": "gb" })).unwrap(),
        );
        news_search(State(state), body).await.unwrap();

        let captured = news.queries.lock().unwrap();
        assert_eq!(captured[0].q.as_deref(), Some("rust"));
        assert_eq!(captured[0].country.as_deref(), Some("gb"));
    }

    #[tokio::test]
    async fn post_with_unreadable_body_uses_default_query() {
        let news = Arc::new(MockNewsService::new());
        let state = stub_state(Some(news.clone()));

        news_search(State(state), Bytes::from_static(b"not json"))
            .await
            .unwrap();

        let captured = news.queries.lock().unwrap();
        assert!(captured[0].q.is_none());
        assert!(captured[0].category.is_none());
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let state = stub_state(None);
        let result = news_headlines(State(state), Query(NewsQuery::default())).await;
        assert!(matches!(
            result,
            Err(ApiError::NotConfigured("News service"))
        ));
    }

    #[tokio::test]
    async fn upstream_failure_is_mapped() {
        let state = stub_state(Some(Arc::new(MockNewsService::failing())));
        let result = news_headlines(State(state), Query(NewsQuery::default())).await;
        match result {
            Err(ApiError::Upstream(msg)) => assert_eq!(msg, "Failed to fetch news"),
            other => panic!("expected upstream error, got {:?}", other.map(|_| ())),
        }
    }
}
