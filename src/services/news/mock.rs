#![allow(dead_code)]
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{ArticleSource, NewsArticle, NewsFeed, NewsQuery, NewsService, NewsServiceError};

#[derive(Clone, Default)]
pub struct MockNewsService {
    pub queries: Arc<Mutex<Vec<NewsQuery>>>,
    pub should_fail: bool,
}

impl MockNewsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl NewsService for MockNewsService {
    async fn fetch(&self, query: &NewsQuery) -> Result<NewsFeed, NewsServiceError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.should_fail {
            return Err(NewsServiceError::Api("mock upstream failure".into()));
        }
        Ok(NewsFeed {
            articles: vec![NewsArticle {
                title: "Mock headline".into(),
                description: Some("Mock description".into()),
                url: "https://example.test/article".into(),
                url_to_image: None,
                published_at: "2024-01-01T00:00:00Z".into(),
                source: ArticleSource {
                    name: "Mock Source".into(),
                    id: None,
                },
                author: None,
                content: None,
            }],
            total_results: 1,
        })
    }
}
