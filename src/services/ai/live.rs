use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::{AiService, AiServiceError, GeneratedText, GenerationRequest, TokenUsage};

const OPENAI_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAiService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiService {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl AiService for OpenAiService {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedText, AiServiceError> {
        let res = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": request.model,
                "messages": [
                    { "role": "system", "content": request.system_prompt },
                    { "role": "user", "content": request.prompt },
                ],
                "max_tokens": request.max_tokens,
                "temperature": request.temperature,
            }))
            .send()
            .await
            .map_err(|err| AiServiceError::Api(err.to_string()))?;

        if !res.status().is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(AiServiceError::Api(detail));
        }

        let data: Value = res
            .json()
            .await
            .map_err(|err| AiServiceError::InvalidResponse(err.to_string()))?;

        let text = data["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        let usage = data
            .get("usage")
            .filter(|u| !u.is_null())
            .map(|u| TokenUsage {
                prompt_tokens: u["prompt_tokens"].as_u64().unwrap_or(0) as u32,
                completion_tokens: u["completion_tokens"].as_u64().unwrap_or(0) as u32,
                total_tokens: u["total_tokens"].as_u64().unwrap_or(0) as u32,
            });

        Ok(GeneratedText { text, usage })
    }
}
