#![allow(dead_code)]
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{SpeechService, SpeechServiceError};

#[derive(Clone, Default)]
pub struct MockSpeechService {
    pub requests: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: bool,
}

impl MockSpeechService {
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
impl SpeechService for MockSpeechService {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechServiceError> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string()));
        if self.should_fail {
            return Err(SpeechServiceError::Api("mock upstream failure".into()));
        }
        Ok(b"mock-audio".to_vec())
    }
}
