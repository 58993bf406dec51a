use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::config::CredentialSource;
use crate::state::AppState;

fn presence(value: &str) -> &'static str {
    if value.is_empty() {
        "MISSING"
    } else {
        "SET"
    }
}

// GET /api/vapi/test-env
// Reports which settings are present. Never echoes their values.
pub async fn test_env(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = &state.config;

    let (source, credential) = match &config.credential_source {
        CredentialSource::Inline(_) => ("inline", "SET"),
        CredentialSource::File(path) => {
            let found = tokio::fs::try_exists(path).await.unwrap_or(false);
            ("file", if found { "SET" } else { "MISSING" })
        }
    };

    Json(json!({
        "ok": true,
        "profile": config.policy.profile,
        "timezone": config.policy.timezone.name(),
        "duration_minutes": config.policy.duration_minutes,
        "credential_source": source,
        "variables": {
            "CAL_ID": presence(&config.calendar_id),
            "GOOGLE_SERVICE_ACCOUNT": credential,
            "VAPI_WEBHOOK_SECRET": presence(&config.webhook_secret),
            "VAPI_PRIVATE_KEY": presence(&config.vapi_private_key),
            "VAPI_ASSISTANT_ID": presence(&config.vapi_assistant_id),
            "PUBLIC_WEBHOOK_URL": presence(&config.public_webhook_url),
            "ADMIN_TOKEN": presence(&config.admin_token),
        }
    }))
}
