use std::collections::BTreeMap;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::models::{
    Attendee, BookingConfirmation, BookingField, BookingPolicy, BookingRequest, CalendarEventDraft,
    EventDateTime, ExtendedProperties, ReminderMethod, ReminderOverride, Reminders, ResolvedSlot,
};

const DAY_BEFORE_MINUTES: u32 = 24 * 60;
const EVENT_SOURCE: &str = "voice-assistant";

pub fn compose_event(
    request: &BookingRequest,
    slot: &ResolvedSlot,
    policy: &BookingPolicy,
    business_name: &str,
    request_id: &str,
) -> CalendarEventDraft {
    let name = request.name.trim();
    let email = request.email.trim();
    let client_type = request.present(BookingField::ClientType);

    let summary = match client_type {
        Some(kind) if policy.summary_includes_client_type => {
            format!("{business_name} consultation – {name} ({kind})")
        }
        _ => format!("{business_name} consultation – {name}"),
    };

    let mut lines = vec![format!("Consultation with {name}"), format!("Email: {email}")];
    if let Some(phone) = request.present(BookingField::Phone) {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(kind) = client_type {
        lines.push(format!("Client type: {kind}"));
    }
    if let Some(spoken) = request.present(BookingField::PreferredTime) {
        lines.push(format!("Requested time: \"{spoken}\""));
    }
    lines.push(String::new());
    lines.push(format!("Scheduled via {business_name} Voice Assistant"));

    let attendees = if policy.invite_attendees {
        vec![Attendee {
            email: email.to_string(),
            display_name: name.to_string(),
        }]
    } else {
        Vec::new()
    };

    let mut private = BTreeMap::new();
    private.insert("source".to_string(), EVENT_SOURCE.to_string());
    private.insert("profile".to_string(), policy.profile.as_str().to_string());
    private.insert("request_id".to_string(), request_id.to_string());
    if let Some(kind) = client_type {
        private.insert("client_type".to_string(), kind.to_string());
    }

    CalendarEventDraft {
        summary,
        description: lines.join("\n"),
        start: event_time(&slot.start, &slot.timezone),
        end: event_time(&slot.end, &slot.timezone),
        attendees,
        reminders: Reminders {
            use_default: false,
            overrides: vec![
                ReminderOverride {
                    method: ReminderMethod::Email,
                    minutes: DAY_BEFORE_MINUTES,
                },
                ReminderOverride {
                    method: ReminderMethod::Popup,
                    minutes: policy.popup_reminder_minutes,
                },
            ],
        },
        extended_properties: ExtendedProperties { private },
    }
}

fn event_time(dt: &DateTime<Tz>, timezone: &str) -> EventDateTime {
    EventDateTime {
        date_time: dt.to_rfc3339(),
        time_zone: timezone.to_string(),
    }
}

/// Spoken-friendly confirmation returned to the voice agent.
pub fn confirm(
    request: &BookingRequest,
    slot: &ResolvedSlot,
    policy: &BookingPolicy,
    event_id: String,
) -> BookingConfirmation {
    let date = slot.start.format("%A, %B %-d, %Y").to_string();
    let time = slot.start.format("%-I:%M %p").to_string();
    let email = request.email.trim();

    let follow_up = if policy.invite_attendees {
        format!("A calendar invite has been sent to {email}.")
    } else {
        format!("A confirmation will be sent to {email}.")
    };

    BookingConfirmation {
        confirmation_message: format!("You're booked for {date} at {time}. {follow_up}"),
        date,
        time,
        duration: policy.duration_label(),
        calendar_event_id: event_id,
    }
}
