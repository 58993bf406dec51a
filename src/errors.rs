use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::Rejection;

pub const CONFIG_ERROR_MESSAGE: &str = "Server configuration error";
pub const BOOKING_FAILED_MESSAGE: &str = "Failed to create booking. Please try again.";
pub const ASSISTANT_FAILED_MESSAGE: &str = "Failed to update assistant";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("booking rejected: {}", .0.message())]
    Validation(Rejection),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("calendar error: {0}")]
    Upstream(String),

    #[error("assistant platform error: {0}")]
    Assistant(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(rejection) => {
                let mut body = serde_json::json!({
                    "ok": false,
                    "error": rejection.message(),
                    "reason": rejection.reason,
                });
                if !rejection.missing_fields.is_empty() {
                    body["missing_fields"] = serde_json::json!(rejection.missing_fields);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::InvalidPayload(detail) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "ok": false, "error": format!("Invalid request body: {detail}") }),
            ),
            AppError::Config(detail) => {
                tracing::error!(error = %detail, "configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "ok": false, "error": CONFIG_ERROR_MESSAGE }),
                )
            }
            AppError::Upstream(detail) => {
                tracing::error!(error = %detail, "calendar call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "ok": false, "error": BOOKING_FAILED_MESSAGE }),
                )
            }
            AppError::Assistant(detail) => {
                tracing::error!(error = %detail, "assistant platform call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    serde_json::json!({ "ok": false, "error": ASSISTANT_FAILED_MESSAGE }),
                )
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "ok": false, "error": "unauthorized" }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
