use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::error;

use crate::responses::ApiError;
use crate::services::speech::DEFAULT_VOICE_ID;
use crate::state::AppState;

const MAX_TEXT_LENGTH: usize = 5000;

#[derive(Debug, Deserialize)]
pub struct SynthesizeBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

// POST /api/tts
//
// Relays the synthesized MP3 directly; clients play or store it themselves.
pub async fn synthesize(
    State(app_state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Response, ApiError> {
    let body: SynthesizeBody = serde_json::from_slice(&body)
        .map_err(|_| ApiError::Validation("Invalid request body".into()))?;

    let text = body
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing required field: text".into()))?;

    // Cap is in characters, not bytes; multibyte text counts per char.
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(ApiError::Validation(
            "Text too long. Maximum 5000 characters.".into(),
        ));
    }

    let speech = app_state
        .speech
        .as_ref()
        .ok_or(ApiError::NotConfigured("TTS service"))?;

    let voice = body.voice.unwrap_or_else(|| DEFAULT_VOICE_ID.to_string());
    match speech.synthesize(&text, &voice).await {
        Ok(audio) => Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response()),
        Err(err) => {
            error!(?err, "elevenlabs request failed");
            Err(ApiError::Upstream("TTS generation failed".into()))
        }
    }
}
