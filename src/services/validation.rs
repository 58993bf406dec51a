use std::sync::LazyLock;

use regex::Regex;

use crate::models::{BookingPolicy, BookingRequest, Rejection, RejectionReason, ValidationResult};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid email regex"));

/// Lowercase fragments that mark a name or email as placeholder data.
const SYNTHETIC_PATTERNS: &[&str] = &[
    "test user",
    "john doe",
    "jane doe",
    "example",
    "@test.",
    "@example.",
    "debug",
    "placeholder",
];

/// Checks required fields, email shape and, when the policy asks for it,
/// placeholder data. Checks run in that order and the first failure wins.
pub fn validate(request: BookingRequest, policy: &BookingPolicy) -> ValidationResult {
    let missing: Vec<String> = policy
        .required_fields
        .iter()
        .filter(|field| request.present(**field).is_none())
        .map(|field| field.as_str().to_string())
        .collect();

    if !missing.is_empty() {
        tracing::info!(missing_fields = ?missing, "booking rejected: missing fields");
        return ValidationResult::Rejected(Rejection::missing(missing));
    }

    if !is_valid_email(&request.email) {
        tracing::info!(reason = "invalid_email_format", "booking rejected");
        return ValidationResult::Rejected(Rejection::because(RejectionReason::InvalidEmailFormat));
    }

    if policy.reject_synthetic && looks_synthetic(&request.name, &request.email) {
        tracing::warn!(reason = "synthetic_data_detected", "booking rejected");
        return ValidationResult::Rejected(Rejection::because(
            RejectionReason::SyntheticDataDetected,
        ));
    }

    ValidationResult::Valid(request)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn looks_synthetic(name: &str, email: &str) -> bool {
    let name = name.to_lowercase();
    let email = email.to_lowercase();
    SYNTHETIC_PATTERNS
        .iter()
        .any(|pattern| name.contains(pattern) || email.contains(pattern))
}
