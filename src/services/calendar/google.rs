use async_trait::async_trait;
use reqwest::Url;
use yup_oauth2::ServiceAccountAuthenticator;

use super::credentials::CredentialProvider;
use super::{CalendarError, CalendarService, SendUpdates};
use crate::models::{CalendarEventDraft, CreatedEvent};

const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Google Calendar v3 REST client authorized with a service account.
pub struct GoogleCalendarClient {
    credentials: Box<dyn CredentialProvider>,
    api_base: String,
    client: reqwest::Client,
}

impl GoogleCalendarClient {
    pub fn new(credentials: Box<dyn CredentialProvider>, api_base: String) -> Self {
        Self {
            credentials,
            api_base,
            client: reqwest::Client::new(),
        }
    }

    async fn access_token(&self) -> Result<String, CalendarError> {
        let key = self
            .credentials
            .service_account_key()
            .await
            .map_err(|e| CalendarError::Credentials(format!("{e:#}")))?;

        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| CalendarError::Credentials(e.to_string()))?;

        let token = auth
            .token(&[CALENDAR_SCOPE])
            .await
            .map_err(|e| CalendarError::Auth(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| CalendarError::Auth("token response carried no access token".to_string()))
    }
}

pub fn events_url(api_base: &str, calendar_id: &str, send_updates: SendUpdates) -> Result<Url, CalendarError> {
    let mut url = Url::parse(api_base)
        .map_err(|e| CalendarError::Request(format!("invalid calendar API base {api_base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| CalendarError::Request(format!("calendar API base cannot hold a path: {api_base}")))?
        .pop_if_empty()
        .extend(["calendars", calendar_id, "events"]);
    url.query_pairs_mut()
        .append_pair("sendUpdates", send_updates.as_str());
    Ok(url)
}

#[async_trait]
impl CalendarService for GoogleCalendarClient {
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEventDraft,
        send_updates: SendUpdates,
    ) -> Result<CreatedEvent, CalendarError> {
        let url = events_url(&self.api_base, calendar_id, send_updates)?;
        let token = self.access_token().await?;

        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(event)
            .send()
            .await
            .map_err(|e| CalendarError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CalendarError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedEvent = resp
            .json()
            .await
            .map_err(|e| CalendarError::Request(format!("failed to parse created event: {e}")))?;

        tracing::info!(event_id = %created.id, "calendar event created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_url_encodes_calendar_id() {
        let url = events_url(
            "https://www.googleapis.com/calendar/v3",
            "team bookings@group.calendar.google.com",
            SendUpdates::All,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%20bookings@group.calendar.google.com/events?sendUpdates=all"
        );
    }

    #[test]
    fn test_events_url_tolerates_trailing_slash() {
        let url = events_url("http://localhost:8080/v3/", "primary", SendUpdates::None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v3/calendars/primary/events?sendUpdates=none");
    }

    #[test]
    fn test_events_url_rejects_bad_base() {
        assert!(events_url("not a url", "primary", SendUpdates::All).is_err());
    }
}
