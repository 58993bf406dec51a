pub mod credentials;
pub mod google;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{CalendarEventDraft, CreatedEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendUpdates {
    All,
    None,
}

impl SendUpdates {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendUpdates::All => "all",
            SendUpdates::None => "none",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("calendar credentials unavailable: {0}")]
    Credentials(String),

    #[error("calendar authorization failed: {0}")]
    Auth(String),

    #[error("calendar request failed: {0}")]
    Request(String),

    #[error("calendar API error ({status}): {body}")]
    Api { status: u16, body: String },
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::Credentials(_) | CalendarError::Auth(_) => AppError::Config(err.to_string()),
            CalendarError::Request(_) | CalendarError::Api { .. } => AppError::Upstream(err.to_string()),
        }
    }
}

#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEventDraft,
        send_updates: SendUpdates,
    ) -> Result<CreatedEvent, CalendarError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_map_to_config() {
        let err: AppError = CalendarError::Credentials("no key".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
        let err: AppError = CalendarError::Auth("invalid_grant".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_api_errors_map_to_upstream() {
        let err: AppError = CalendarError::Api {
            status: 403,
            body: "forbidden".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
