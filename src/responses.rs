use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Boundary error taxonomy. Every handler converts its own failures into one
/// of these; the response body is always `{ "error": "<message>" }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0} not configured")]
    NotConfigured(&'static str),
    #[error("{0}")]
    Upstream(String),
    #[error("Internal server error")]
    Internal(#[source] sqlx::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotConfigured(_) | ApiError::Upstream(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use serde_json::from_slice;

    use crate::responses::{ApiError, ErrorBody};

    #[tokio::test]
    async fn test_validation_response() {
        let resp = ApiError::Validation("Missing required field: prompt".into()).into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: ErrorBody = from_slice(&body).unwrap();
        assert_eq!(json.error, "Missing required field: prompt");
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let resp = ApiError::Unauthorized.into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: ErrorBody = from_slice(&body).unwrap();
        assert_eq!(json.error, "Unauthorized");
    }

    #[tokio::test]
    async fn test_not_configured_response() {
        let resp = ApiError::NotConfigured("AI service").into_response();
        assert_eq!(
            resp.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: ErrorBody = from_slice(&body).unwrap();
        assert_eq!(json.error, "AI service not configured");
    }

    #[tokio::test]
    async fn test_internal_response_hides_detail() {
        let resp = ApiError::Internal(sqlx::Error::RowNotFound).into_response();
        assert_eq!(
            resp.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: ErrorBody = from_slice(&body).unwrap();
        assert_eq!(json.error, "Internal server error");
    }
}
