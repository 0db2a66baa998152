use crate::error::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Error rendered as a JSON `{"error": "..."}` body with a matching status.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        let status = match &e {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::NoSession => StatusCode::UNAUTHORIZED,
            ApiError::Http { .. } | ApiError::Transport(_) | ApiError::Decode(_) => {
                tracing::error!("Upstream analytics call failed: {}", e);
                StatusCode::BAD_GATEWAY
            }
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}
