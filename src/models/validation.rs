use serde::Serialize;

use super::booking::BookingRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    MissingFields,
    InvalidEmailFormat,
    SyntheticDataDetected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectionReason,
    pub missing_fields: Vec<String>,
}

impl Rejection {
    pub fn missing(fields: Vec<String>) -> Self {
        Self {
            reason: RejectionReason::MissingFields,
            missing_fields: fields,
        }
    }

    pub fn because(reason: RejectionReason) -> Self {
        Self {
            reason,
            missing_fields: Vec::new(),
        }
    }

    /// Sentence the voice agent can read back or use to re-prompt.
    pub fn message(&self) -> String {
        match self.reason {
            RejectionReason::MissingFields => {
                format!("Missing required fields: {}", self.missing_fields.join(", "))
            }
            RejectionReason::InvalidEmailFormat => {
                "The email address does not look valid. Please provide a valid email address."
                    .to_string()
            }
            RejectionReason::SyntheticDataDetected => {
                "Test or placeholder details cannot be booked. Please provide real contact details."
                    .to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(BookingRequest),
    Rejected(Rejection),
}
