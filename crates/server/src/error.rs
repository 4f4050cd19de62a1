use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gnubg::EngineError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Malformed bodies get the same `{"error": ...}` shape as everything else.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Engine(e) if e.is_timeout() => {
                tracing::warn!("gnubg timeout: {e}");
                StatusCode::GATEWAY_TIMEOUT
            }
            AppError::Engine(e) => {
                tracing::error!("gnubg error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
