use serde::Deserialize;

use super::booking::BookingRequest;

/// Inbound body of the booking webhook. Vapi wraps function arguments in a
/// server message; direct callers post the arguments as-is.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BookingPayload {
    FunctionCall { message: ServerMessage },
    Direct(BookingRequest),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub function_call: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: BookingRequest,
}

impl BookingPayload {
    pub fn into_request(self) -> BookingRequest {
        match self {
            BookingPayload::FunctionCall { message } => message.function_call.parameters,
            BookingPayload::Direct(request) => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_payload() {
        let payload: BookingPayload =
            serde_json::from_str(r#"{"name":"Maria Lopez","email":"maria@realmail.com"}"#).unwrap();
        let req = payload.into_request();
        assert_eq!(req.name, "Maria Lopez");
        assert_eq!(req.email, "maria@realmail.com");
    }

    #[test]
    fn test_function_call_envelope() {
        let json = r#"{
            "message": {
                "type": "function-call",
                "functionCall": {
                    "name": "book_consultation",
                    "parameters": {
                        "name": "Maria Lopez",
                        "email": "maria@realmail.com",
                        "preferred_time": "tomorrow at 3pm"
                    }
                }
            }
        }"#;
        let payload: BookingPayload = serde_json::from_str(json).unwrap();
        assert!(matches!(payload, BookingPayload::FunctionCall { .. }));
        let req = payload.into_request();
        assert_eq!(req.preferred_time.as_deref(), Some("tomorrow at 3pm"));
    }
}
