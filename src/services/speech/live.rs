use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::{SpeechService, SpeechServiceError, DEFAULT_MODEL_ID};

const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

pub struct ElevenLabsService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ElevenLabsService {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: ELEVENLABS_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SpeechService for ElevenLabsService {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechServiceError> {
        let res = self
            .client
            .post(format!("{}/v1/text-to-speech/{}", self.base_url, voice))
            .header("xi-api-key", &self.api_key)
            .json(&json!({
                "text": text,
                "model_id": DEFAULT_MODEL_ID,
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75,
                },
            }))
            .send()
            .await
            .map_err(|err| SpeechServiceError::Api(err.to_string()))?;

        if !res.status().is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(SpeechServiceError::Api(detail));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|err| SpeechServiceError::InvalidResponse(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}
