pub mod assistant;
pub mod booking;
pub mod diagnostics;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/vapi/book", post(booking::book))
        .route("/api/vapi/update-assistant", post(assistant::update_assistant))
        .route("/api/vapi/test-env", get(diagnostics::test_env))
        .with_state(state)
}
