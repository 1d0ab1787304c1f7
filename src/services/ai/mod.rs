use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, thiserror::Error)]
pub enum AiServiceError {
    #[error("ai api error: {0}")]
    Api(String),
    #[error("invalid ai response: {0}")]
    InvalidResponse(String),
}

/// Fully defaulted generation parameters; handlers resolve optional request
/// fields before calling the service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system_prompt: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait AiService: Send + Sync {
    async fn generate(&self, request: GenerationRequest)
        -> Result<GeneratedText, AiServiceError>;
}

mod live;
mod mock;

pub use live::OpenAiService;
pub use mock::MockAiService;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_captures_request_and_returns_text() {
        let mock = MockAiService::with_text("generated output");
        let request = GenerationRequest {
            prompt: "write a haiku".into(),
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        };

        let out = mock.generate(request.clone()).await.unwrap();
        assert_eq!(out.text, "generated output");

        let captured = mock.requests.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].prompt, request.prompt);
        assert_eq!(captured[0].model, request.model);
    }
}
