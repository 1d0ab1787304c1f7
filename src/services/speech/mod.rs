use async_trait::async_trait;

/// ElevenLabs "Rachel" voice.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("speech api error: {0}")]
    Api(String),
    #[error("invalid speech response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Synthesizes `text` with the given voice id and returns MP3 bytes.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechServiceError>;
}

mod live;
mod mock;

pub use live::ElevenLabsService;
pub use mock::MockSpeechService;
