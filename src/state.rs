use crate::config::Config;
use crate::db::{
    profile_repository::ProfileRepository, subscription_repository::SubscriptionRepository,
};
use crate::services::{ai::AiService, news::NewsService, speech::SpeechService};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub ai: Option<Arc<dyn AiService>>,
    pub speech: Option<Arc<dyn SpeechService>>,
    pub news: Option<Arc<dyn NewsService>>,
    pub http_client: Arc<Client>,
    pub config: Arc<Config>,
}
