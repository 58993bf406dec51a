use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::{BookingConfirmation, BookingField, BookingRequest, ValidationResult};
use crate::services::calendar::SendUpdates;
use crate::services::{composer, time_resolver, validation};
use crate::state::AppState;

/// Validates the request, resolves its slot and books it on the calendar.
///
/// Rejected input returns before configuration is inspected or any calendar
/// call is made.
pub async fn create_booking(
    state: &AppState,
    request: BookingRequest,
    now: DateTime<Utc>,
    request_id: &str,
) -> Result<BookingConfirmation, AppError> {
    let policy = &state.config.policy;

    let request = match validation::validate(request, policy) {
        ValidationResult::Valid(request) => request,
        ValidationResult::Rejected(rejection) => return Err(AppError::Validation(rejection)),
    };

    if state.config.calendar_id.is_empty() {
        return Err(AppError::Config("CAL_ID is not set".to_string()));
    }

    let slot = time_resolver::resolve_slot(request.present(BookingField::PreferredTime), now, policy);
    tracing::info!(
        rule = slot.rule.as_str(),
        start = %slot.start.to_rfc3339(),
        has_phone = request.present(BookingField::Phone).is_some(),
        "booking slot resolved"
    );

    let event = composer::compose_event(&request, &slot, policy, &state.config.business_name, request_id);
    let send_updates = if policy.invite_attendees {
        SendUpdates::All
    } else {
        SendUpdates::None
    };

    let created = state
        .calendar
        .insert_event(&state.config.calendar_id, &event, send_updates)
        .await?;

    Ok(composer::confirm(&request, &slot, policy, created.id))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::Value;

    use super::*;
    use crate::config::{AppConfig, CredentialSource, DEFAULT_CALENDAR_API_BASE};
    use crate::models::{BookingPolicy, CalendarEventDraft, CreatedEvent, RejectionReason};
    use crate::services::assistant::AssistantPlatform;
    use crate::services::calendar::{CalendarError, CalendarService};

    struct RecordingCalendar {
        calls: Mutex<Vec<(String, CalendarEventDraft, SendUpdates)>>,
        fail_with: Option<fn() -> CalendarError>,
    }

    #[async_trait]
    impl CalendarService for RecordingCalendar {
        async fn insert_event(
            &self,
            calendar_id: &str,
            event: &CalendarEventDraft,
            send_updates: SendUpdates,
        ) -> Result<CreatedEvent, CalendarError> {
            self.calls
                .lock()
                .unwrap()
                .push((calendar_id.to_string(), event.clone(), send_updates));
            match self.fail_with {
                Some(make_err) => Err(make_err()),
                None => Ok(CreatedEvent {
                    id: "evt_roundtrip".to_string(),
                }),
            }
        }
    }

    struct NoAssistant;

    #[async_trait]
    impl AssistantPlatform for NoAssistant {
        async fn update_assistant(&self, _: &str, _: &Value) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn state(policy: BookingPolicy, calendar_id: &str, fail_with: Option<fn() -> CalendarError>) -> AppState {
        AppState {
            config: AppConfig {
                port: 3000,
                calendar_id: calendar_id.to_string(),
                credential_source: CredentialSource::File(PathBuf::from("service-account.json")),
                calendar_api_base: DEFAULT_CALENDAR_API_BASE.to_string(),
                business_name: "Mardi".to_string(),
                policy,
                webhook_secret: String::new(),
                admin_token: String::new(),
                vapi_private_key: String::new(),
                vapi_assistant_id: String::new(),
                public_webhook_url: String::new(),
            },
            calendar: Box::new(RecordingCalendar {
                calls: Mutex::new(Vec::new()),
                fail_with,
            }),
            assistant: Box::new(NoAssistant),
        }
    }

    fn maria() -> BookingRequest {
        BookingRequest {
            name: "Maria Lopez".to_string(),
            email: "maria@realmail.com".to_string(),
            phone: Some("+995555123456".to_string()),
            preferred_time: Some("tomorrow at 3pm".to_string()),
            client_type: Some("Individual".to_string()),
        }
    }

    fn tuesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 17, 5, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_event_id_round_trips() {
        let state = state(BookingPolicy::strict(), "cal@group.calendar.google.com", None);
        let confirmation = create_booking(&state, maria(), tuesday(), "req-1").await.unwrap();

        assert_eq!(confirmation.calendar_event_id, "evt_roundtrip");
        assert_eq!(confirmation.date, "Wednesday, June 18, 2025");
        assert_eq!(confirmation.time, "3:00 PM");
        assert_eq!(confirmation.duration, "45 minutes");
    }

    #[tokio::test]
    async fn test_rejected_request_never_reaches_calendar() {
        let state = state(BookingPolicy::strict(), "", None);
        let request = BookingRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            ..maria()
        };
        let err = create_booking(&state, request, tuesday(), "req-2").await.unwrap_err();
        match err {
            AppError::Validation(r) => assert_eq!(r.reason, RejectionReason::SyntheticDataDetected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_calendar_id_is_config_error() {
        let state = state(BookingPolicy::lenient(), "", None);
        let err = create_booking(&state, maria(), tuesday(), "req-3").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_calendar_failure_is_upstream_error() {
        let state = state(
            BookingPolicy::lenient(),
            "primary",
            Some(|| CalendarError::Request("connection reset".to_string())),
        );
        let err = create_booking(&state, maria(), tuesday(), "req-4").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_credential_failure_is_config_error() {
        let state = state(
            BookingPolicy::lenient(),
            "primary",
            Some(|| CalendarError::Credentials("no key file".to_string())),
        );
        let err = create_booking(&state, maria(), tuesday(), "req-5").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
