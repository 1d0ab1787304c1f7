use async_trait::async_trait;
use reqwest::Client;

use super::{
    NewsFeed, NewsQuery, NewsService, NewsServiceError, DEFAULT_COUNTRY, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};

const NEWSAPI_BASE_URL: &str = "https://newsapi.org";

pub struct NewsApiService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiService {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: NEWSAPI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl NewsService for NewsApiService {
    async fn fetch(&self, query: &NewsQuery) -> Result<NewsFeed, NewsServiceError> {
        // Keyword searches go through /everything, browsing through
        // /top-headlines; see https://newsapi.org/docs
        let endpoint = if query.q.is_some() {
            "/v2/everything"
        } else {
            "/v2/top-headlines"
        };

        let page_size = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        let country = query
            .country
            .clone()
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        let mut params: Vec<(&str, String)> = vec![
            ("apiKey", self.api_key.clone()),
            ("country", country),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if let Some(q) = &query.q {
            params.push(("q", q.clone()));
        }

        let res = self
            .client
            .get(format!("{}{}", self.base_url, endpoint))
            .query(&params)
            .send()
            .await
            .map_err(|err| NewsServiceError::Api(err.to_string()))?;

        if !res.status().is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(NewsServiceError::Api(detail));
        }

        res.json::<NewsFeed>()
            .await
            .map_err(|err| NewsServiceError::InvalidResponse(err.to_string()))
    }
}
