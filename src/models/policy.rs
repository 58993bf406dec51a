use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tbilisi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingProfile {
    Lenient,
    Strict,
}

impl BookingProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingProfile::Lenient => "lenient",
            BookingProfile::Strict => "strict",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Some(BookingProfile::Lenient),
            "strict" => Some(BookingProfile::Strict),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    Name,
    Email,
    Phone,
    PreferredTime,
    ClientType,
}

impl BookingField {
    pub const ALL: [BookingField; 5] = [
        BookingField::Name,
        BookingField::Email,
        BookingField::Phone,
        BookingField::PreferredTime,
        BookingField::ClientType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::PreferredTime => "preferred_time",
            BookingField::ClientType => "client_type",
        }
    }
}

/// Deployment policy selected once at startup and passed to the validator,
/// the time resolver and the event composer.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPolicy {
    pub profile: BookingProfile,
    pub required_fields: Vec<BookingField>,
    pub reject_synthetic: bool,
    pub duration_minutes: u32,
    pub timezone: Tz,
    pub invite_attendees: bool,
    pub popup_reminder_minutes: u32,
    pub summary_includes_client_type: bool,
}

impl BookingPolicy {
    pub fn lenient() -> Self {
        Self {
            profile: BookingProfile::Lenient,
            required_fields: vec![BookingField::Name, BookingField::Email],
            reject_synthetic: true,
            duration_minutes: 30,
            timezone: DEFAULT_TIMEZONE,
            invite_attendees: true,
            popup_reminder_minutes: 15,
            summary_includes_client_type: false,
        }
    }

    pub fn strict() -> Self {
        Self {
            profile: BookingProfile::Strict,
            required_fields: BookingField::ALL.to_vec(),
            reject_synthetic: true,
            duration_minutes: 45,
            timezone: DEFAULT_TIMEZONE,
            invite_attendees: false,
            popup_reminder_minutes: 30,
            summary_includes_client_type: true,
        }
    }

    pub fn for_profile(profile: BookingProfile) -> Self {
        match profile {
            BookingProfile::Lenient => Self::lenient(),
            BookingProfile::Strict => Self::strict(),
        }
    }

    pub fn requires(&self, field: BookingField) -> bool {
        self.required_fields.contains(&field)
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn duration_label(&self) -> String {
        format!("{} minutes", self.duration_minutes)
    }
}
