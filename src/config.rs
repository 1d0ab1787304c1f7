use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Process-wide configuration, read once at startup. Provider API keys are
/// optional: a handler whose key is absent answers with a not-configured
/// error instead of failing the whole process.
pub struct Config {
    pub database_url: String,
    pub frontend_origin: Option<String>,
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub revenuecat_webhook_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        Ok(Config {
            database_url,
            frontend_origin: env::var("FRONTEND_ORIGIN").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY").ok(),
            news_api_key: env::var("NEWS_API_KEY").ok(),
            revenuecat_webhook_secret: env::var("REVENUECAT_WEBHOOK_SECRET").ok(),
        })
    }
}
