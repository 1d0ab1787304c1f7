#![allow(dead_code)]
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{AiService, AiServiceError, GeneratedText, GenerationRequest, TokenUsage};

#[derive(Clone, Default)]
pub struct MockAiService {
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub response_text: String,
    pub should_fail: bool,
}

impl MockAiService {
    pub fn with_text(text: &str) -> Self {
        Self {
            response_text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl AiService for MockAiService {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedText, AiServiceError> {
        self.requests.lock().unwrap().push(request);
        if self.should_fail {
            return Err(AiServiceError::Api("mock upstream failure".into()));
        }
        Ok(GeneratedText {
            text: self.response_text.clone(),
            usage: Some(TokenUsage {
                prompt_tokens: 1,
                completion_tokens: 1,
                total_tokens: 2,
            }),
        })
    }
}
