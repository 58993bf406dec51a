use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use constant_time_eq::constant_time_eq;
use serde::Serialize;
use tracing::Instrument;

use crate::errors::AppError;
use crate::models::{BookingConfirmation, BookingPayload};
use crate::services::booking;
use crate::state::AppState;

pub const SECRET_HEADER: &str = "x-vapi-secret";

#[derive(Serialize)]
pub struct BookingResponse {
    pub ok: bool,
    pub booking_details: BookingConfirmation,
}

fn check_secret(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    // No secret configured: accept unsigned calls (local development).
    if expected.is_empty() {
        return Ok(());
    }

    let provided = headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        tracing::warn!(header_present = !provided.is_empty(), "webhook secret mismatch");
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// POST /api/vapi/book
pub async fn book(State(state): State<Arc<AppState>>, headers: HeaderMap, body: Bytes) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("booking", request_id = %request_id);

    async move {
        if let Err(e) = check_secret(&headers, &state.config.webhook_secret) {
            return e.into_response();
        }

        let payload: BookingPayload = match serde_json::from_slice(&body) {
            Ok(p) => p,
            Err(e) => return AppError::InvalidPayload(e.to_string()).into_response(),
        };
        if let BookingPayload::FunctionCall { message } = &payload {
            tracing::debug!(
                kind = message.kind.as_deref().unwrap_or(""),
                function = message.function_call.name.as_deref().unwrap_or(""),
                "function-call envelope"
            );
        }

        tracing::info!(profile = state.config.policy.profile.as_str(), "booking request received");

        match booking::create_booking(&state, payload.into_request(), chrono::Utc::now(), &request_id).await {
            Ok(details) => {
                tracing::info!(event_id = %details.calendar_event_id, "booking created");
                Json(BookingResponse {
                    ok: true,
                    booking_details: details,
                })
                .into_response()
            }
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}
