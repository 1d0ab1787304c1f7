use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::error;

use crate::responses::ApiError;
use crate::services::ai::{
    GeneratedText, GenerationRequest, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

// POST /api/ai/generate
//
// All AI calls go through this proxy so provider keys never reach clients.
pub async fn generate(
    State(app_state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<GeneratedText>, ApiError> {
    let body: GenerateBody = serde_json::from_slice(&body)
        .map_err(|_| ApiError::Validation("Invalid request body".into()))?;

    let prompt = body
        .prompt
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing required field: prompt".into()))?;

    let ai = app_state
        .ai
        .as_ref()
        .ok_or(ApiError::NotConfigured("AI service"))?;

    let request = GenerationRequest {
        prompt,
        model: body.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        max_tokens: body.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: body.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        system_prompt: body
            .system_prompt
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
    };

    match ai.generate(request).await {
        Ok(generated) => Ok(Json(generated)),
        Err(err) => {
            error!(?err, "openai request failed");
            Err(ApiError::Upstream("AI generation failed".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::mock_db::MockDb;
    use crate::services::ai::MockAiService;
    use axum::body::Bytes;
    use serde_json::json;
    use std::sync::Arc;

    fn stub_state(ai: Option<Arc<MockAiService>>) -> AppState {
        let db = Arc::new(MockDb::default());
        let ai: Option<Arc<dyn crate::services::ai::AiService>> = match ai {
            Some(svc) => Some(svc),
            None => None,
        };
        AppState {
            subscriptions: db.clone(),
            profiles: db,
            ai,
            speech: None,
            news: None,
            http_client: Arc::new(reqwest::Client::new()),
            config: Arc::new(Config {
                database_url: "postgres://localhost".into(),
                frontend_origin: None,
                openai_api_key: None,
                elevenlabs_api_key: None,
                news_api_key: None,
                revenuecat_webhook_secret: None,
            }),
        }
    }

    fn body(value: serde_json::Value) -> Bytes {
        Bytes::from(serde_json::to_vec(&value).unwrap())
    }

    #[tokio::test]
    async fn generates_with_defaults_filled_in() {
        let ai = Arc::new(MockAiService::with_text("a haiku"));
        let state = stub_state(Some(ai.clone()));

        let out = generate(State(state), body(json!({ "prompt": "write a haiku" })))
            .await
            .unwrap();
        assert_eq!(out.0.text, "a haiku");

        let captured = ai.requests.lock().unwrap();
        assert_eq!(captured[0].prompt, "write a haiku");
        assert_eq!(captured[0].model, DEFAULT_MODEL);
        assert_eq!(captured[0].max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(captured[0].system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn overrides_are_forwarded() {
        let ai = Arc::new(MockAiService::with_text("ok"));
        let state = stub_state(Some(ai.clone()));

        generate(
            State(state),
            body(json!({
                "prompt": "hello",
                "model": "gpt-4o",
                "maxTokens": 64,
                "temperature": 0.2,
                "systemPrompt": "Be terse.",
            })),
        )
        .await
        .unwrap();

        let captured = ai.requests.lock().unwrap();
        assert_eq!(captured[0].model, "gpt-4o");
        assert_eq!(captured[0].max_tokens, 64);
        assert_eq!(captured[0].system_prompt, "Be terse.");
    }

    #[tokio::test]
    async fn missing_prompt_is_a_validation_error() {
        let ai = Arc::new(MockAiService::with_text("ok"));
        let state = stub_state(Some(ai.clone()));

        let result = generate(State(state), body(json!({ "model": "gpt-4o" }))).await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(ai.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_prompt_is_a_validation_error() {
        let state = stub_state(Some(Arc::new(MockAiService::with_text("ok"))));
        let result = generate(State(state), body(json!({ "prompt": "" }))).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let state = stub_state(None);
        let result = generate(State(state), body(json!({ "prompt": "hello" }))).await;
        assert!(matches!(
            result,
            Err(ApiError::NotConfigured("AI service"))
        ));
    }

    #[tokio::test]
    async fn upstream_failure_is_mapped() {
        let state = stub_state(Some(Arc::new(MockAiService::failing())));
        let result = generate(State(state), body(json!({ "prompt": "hello" }))).await;
        match result {
            Err(ApiError::Upstream(msg)) => assert_eq!(msg, "AI generation failed"),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
