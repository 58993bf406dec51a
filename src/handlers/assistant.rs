use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use constant_time_eq::constant_time_eq;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::services::assistant::build_assistant_config;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssistantRequest {
    #[serde(default, rename = "webhookUrl")]
    pub webhook_url: Option<String>,
}

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if expected_token.is_empty() || !constant_time_eq(token.as_bytes(), expected_token.as_bytes()) {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// POST /api/vapi/update-assistant
pub async fn update_assistant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Option<Json<UpdateAssistantRequest>>,
) -> Result<Json<Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let config = &state.config;
    if config.vapi_private_key.is_empty() || config.vapi_assistant_id.is_empty() {
        return Err(AppError::Config(
            "VAPI_PRIVATE_KEY and VAPI_ASSISTANT_ID must be set".to_string(),
        ));
    }

    let requested = payload
        .and_then(|Json(p)| p.webhook_url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    let webhook_url = match requested {
        Some(url) => url,
        None if !config.public_webhook_url.is_empty() => config.public_webhook_url.clone(),
        None => {
            return Err(AppError::InvalidPayload(
                "webhookUrl is required when PUBLIC_WEBHOOK_URL is not configured".to_string(),
            ))
        }
    };

    let assistant_config = build_assistant_config(
        &config.business_name,
        &config.policy,
        &webhook_url,
        &config.webhook_secret,
    );

    state
        .assistant
        .update_assistant(&config.vapi_assistant_id, &assistant_config)
        .await
        .map_err(|e| AppError::Assistant(format!("{e:#}")))?;

    tracing::info!(assistant_id = %config.vapi_assistant_id, webhook_url = %webhook_url, "assistant updated");

    Ok(Json(json!({
        "ok": true,
        "message": "Assistant updated successfully",
        "webhookUrl": webhook_url,
        "assistantId": config.vapi_assistant_id,
    })))
}
