use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use voicebook::config::AppConfig;
use voicebook::handlers;
use voicebook::services::assistant::vapi::VapiClient;
use voicebook::services::calendar::credentials;
use voicebook::services::calendar::google::GoogleCalendarClient;
use voicebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    if config.calendar_id.is_empty() {
        tracing::warn!("CAL_ID is not set; booking requests will fail until it is configured");
    }
    tracing::info!(
        profile = config.policy.profile.as_str(),
        timezone = config.policy.timezone.name(),
        duration_minutes = config.policy.duration_minutes,
        credential_source = ?config.credential_source,
        "booking policy loaded"
    );

    let calendar = GoogleCalendarClient::new(
        credentials::from_source(&config.credential_source),
        config.calendar_api_base.clone(),
    );
    let assistant = VapiClient::new(config.vapi_private_key.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        calendar: Box::new(calendar),
        assistant: Box::new(assistant),
    });

    let app = handlers::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
