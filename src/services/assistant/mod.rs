pub mod vapi;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::{BookingField, BookingPolicy};

pub const BOOKING_FUNCTION: &str = "book_consultation";

#[async_trait]
pub trait AssistantPlatform: Send + Sync {
    async fn update_assistant(&self, assistant_id: &str, config: &Value) -> anyhow::Result<()>;
}

fn system_prompt(business_name: &str, policy: &BookingPolicy) -> String {
    let fields = policy
        .required_fields
        .iter()
        .enumerate()
        .map(|(i, field)| format!("{}. {}", i + 1, field_prompt(*field)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are the consultation booking assistant for {business_name}. Your only job is to \
collect the caller's details and book a consultation.

Collect these details one at a time, in this order:
{fields}

Rules:
- Ask for one detail at a time and keep a friendly, natural tone.
- Names must be real; do not accept placeholders such as \"Test User\" or \"John Doe\".
- Email addresses must look valid; do not accept @example.com or @test.com addresses.
- Ask for a specific day and time, for example \"tomorrow at 2pm\".
- Read every detail back and wait for the caller to confirm before booking.
- Call {BOOKING_FUNCTION} only once every detail above is collected and confirmed.
- After booking, read the confirmation message back to the caller."
    )
}

fn field_prompt(field: BookingField) -> &'static str {
    match field {
        BookingField::Name => "Full name (first and last)",
        BookingField::Email => "Email address",
        BookingField::Phone => "Phone number, international format preferred",
        BookingField::PreferredTime => "Preferred appointment date and time",
        BookingField::ClientType => "Whether they book as an Individual or for a Corporate client",
    }
}

fn function_schema(policy: &BookingPolicy) -> Value {
    let required: Vec<&str> = policy.required_fields.iter().map(BookingField::as_str).collect();

    json!({
        "name": BOOKING_FUNCTION,
        "description": "Books a consultation. Call only after every required detail has been collected and confirmed by the caller.",
        "parameters": {
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Full name of the client (first and last name)" },
                "email": { "type": "string", "description": "Valid email address of the client" },
                "phone": { "type": "string", "description": "Phone number of the client" },
                "preferred_time": {
                    "type": "string",
                    "description": "Preferred appointment time, e.g. 'tomorrow at 2pm' or '2025-06-18 15:00'"
                },
                "client_type": {
                    "type": "string",
                    "enum": ["Individual", "Corporate"],
                    "description": "Whether the client books as an individual or for a company"
                }
            },
            "required": required
        }
    })
}

/// Assistant definition pushed to the voice-agent platform.
pub fn build_assistant_config(
    business_name: &str,
    policy: &BookingPolicy,
    webhook_url: &str,
    webhook_secret: &str,
) -> Value {
    let first_message = format!(
        "Hello! I'm here to help you schedule a consultation with {business_name}. May I have your full name please?"
    );

    let mut config = json!({
        "model": {
            "provider": "openai",
            "model": "gpt-4o-mini",
            "temperature": 0.7,
            "messages": [
                { "role": "system", "content": system_prompt(business_name, policy) }
            ],
            "functions": [function_schema(policy)]
        },
        "serverUrl": webhook_url,
        "firstMessage": first_message,
        "endCallMessage": format!("Thank you for booking with {business_name}. Have a great day!"),
        "endCallPhrases": ["goodbye", "that's all", "end call"],
        "serverMessages": ["function-call", "end-of-call-report", "status-update", "hang"],
        "clientMessages": ["transcript", "hang", "function-call"],
        "silenceTimeoutSeconds": 30,
        "maxDurationSeconds": 600
    });

    if !webhook_secret.is_empty() {
        config["serverUrlSecret"] = json!(webhook_secret);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_list_follows_profile() {
        let strict = build_assistant_config("Mardi", &BookingPolicy::strict(), "https://x/api/vapi/book", "");
        let required = &strict["model"]["functions"][0]["parameters"]["required"];
        assert_eq!(
            required,
            &json!(["name", "email", "phone", "preferred_time", "client_type"])
        );

        let lenient = build_assistant_config("Mardi", &BookingPolicy::lenient(), "https://x/api/vapi/book", "");
        let required = &lenient["model"]["functions"][0]["parameters"]["required"];
        assert_eq!(required, &json!(["name", "email"]));
    }

    #[test]
    fn test_secret_only_included_when_set() {
        let config = build_assistant_config("Mardi", &BookingPolicy::lenient(), "https://x", "");
        assert!(config.get("serverUrlSecret").is_none());

        let config = build_assistant_config("Mardi", &BookingPolicy::lenient(), "https://x", "s3cret");
        assert_eq!(config["serverUrlSecret"], "s3cret");
        assert_eq!(config["serverUrl"], "https://x");
    }

    #[test]
    fn test_prompt_lists_fields_in_order() {
        let prompt = system_prompt("Mardi", &BookingPolicy::strict());
        assert!(prompt.contains("booking assistant for Mardi"));
        let name = prompt.find("1. Full name").unwrap();
        let client = prompt.find("5. Whether they book").unwrap();
        assert!(name < client);
    }
}
