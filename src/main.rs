mod config;
mod db;
mod models;
mod responses;
mod routes;
mod services;
mod state;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Json, Router,
};
use config::Config;
use db::postgres_profile_repository::PostgresProfileRepository;
use db::postgres_subscription_repository::PostgresSubscriptionRepository;
use reqwest::Client;
use routes::{
    ai::generate,
    news::{news_headlines, news_search},
    revenuecat::revenuecat_webhook,
    social::{social_feed, social_search},
    tts::synthesize,
};
use services::ai::{AiService, OpenAiService};
use services::news::{NewsApiService, NewsService};
use services::speech::{ElevenLabsService, SpeechService};
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::db::{
    profile_repository::ProfileRepository, subscription_repository::SubscriptionRepository,
};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let rate_limit_ms: u64 = std::env::var("RATE_LIMITER_MILLISECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        // Default: 200ms/token (~5 req/sec)
        .unwrap_or(200);
    let rate_limit_burst: u32 = std::env::var("RATE_LIMITER_BURST")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        // Default: allow short bursts during client polling
        .unwrap_or(20);
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(rate_limit_ms)
            .burst_size(rate_limit_burst)
            .use_headers()
            .finish()
            .unwrap(),
    );

    // Background task to cleanup old IPs
    let governor_limiter = governor_conf.limiter().clone();
    std::thread::spawn(move || {
        let interval = std::time::Duration::from_secs(60);
        loop {
            std::thread::sleep(interval);
            governor_limiter.retain_recent();
        }
    });

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let pg_pool = establish_connection(&config.database_url).await;
    let subscriptions = Arc::new(PostgresSubscriptionRepository {
        pool: pg_pool.clone(),
    }) as Arc<dyn SubscriptionRepository>;

    let profiles = Arc::new(PostgresProfileRepository {
        pool: pg_pool.clone(),
    }) as Arc<dyn ProfileRepository>;

    let http_client = Client::new();

    let ai = config
        .openai_api_key
        .as_deref()
        .map(|key| Arc::new(OpenAiService::new(http_client.clone(), key)) as Arc<dyn AiService>);
    let speech = config.elevenlabs_api_key.as_deref().map(|key| {
        Arc::new(ElevenLabsService::new(http_client.clone(), key)) as Arc<dyn SpeechService>
    });
    let news = config
        .news_api_key
        .as_deref()
        .map(|key| Arc::new(NewsApiService::new(http_client.clone(), key)) as Arc<dyn NewsService>);

    let allow_origin = match config.frontend_origin.as_deref() {
        Some(origin) => AllowOrigin::exact(
            origin
                .parse::<HeaderValue>()
                .expect("FRONTEND_ORIGIN must be a valid origin"),
        ),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let state = AppState {
        subscriptions,
        profiles,
        ai,
        speech,
        news,
        http_client: Arc::new(http_client),
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/", get(root))
        .route("/api/ai/generate", post(generate))
        .route("/api/tts", post(synthesize))
        .route("/api/news", get(news_headlines).post(news_search))
        .route("/api/social", get(social_feed).post(social_search))
        .route("/api/webhooks/revenuecat", post(revenuecat_webhook))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(GovernorLayer {
                    config: governor_conf,
                })
                .layer(cors),
        );

    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    let listener = TcpListener::bind(addr).await.unwrap();
    println!("Running at http://{}", addr);
    axum::serve(listener, make_service).await.unwrap();
}

/// A simple root route.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Establish a connection to the database and verify it.
async fn establish_connection(database_url: &str) -> PgPool {
    let pool = PgPool::connect(database_url)
        .await
        .expect("Failed to connect to the database");

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .expect("Failed to verify database connection");

    info!("✅ Successfully connected to the database");
    pool
}
