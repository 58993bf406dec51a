use serde::{Deserialize, Deserializer, Serialize};

use super::policy::BookingField;

/// Arguments of the `book_consultation` function as sent by the voice agent.
///
/// Absent or `null` name/email arrive as empty strings so the validator can
/// report them as missing instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub client_type: Option<String>,
}

impl BookingRequest {
    pub fn field(&self, field: BookingField) -> Option<&str> {
        match field {
            BookingField::Name => Some(self.name.as_str()),
            BookingField::Email => Some(self.email.as_str()),
            BookingField::Phone => self.phone.as_deref(),
            BookingField::PreferredTime => self.preferred_time.as_deref(),
            BookingField::ClientType => self.client_type.as_deref(),
        }
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn present(&self, field: BookingField) -> Option<&str> {
        self.field(field).map(str::trim).filter(|v| !v.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `booking_details` object returned to the voice agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub date: String,
    pub time: String,
    pub duration: String,
    pub calendar_event_id: String,
    pub confirmation_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_names_deserialize_empty() {
        let req: BookingRequest = serde_json::from_str(r#"{"email":null}"#).unwrap();
        assert_eq!(req.name, "");
        assert_eq!(req.email, "");
        assert_eq!(req.phone, None);
    }

    #[test]
    fn test_present_trims_and_filters_blank() {
        let req = BookingRequest {
            name: "  Maria Lopez ".to_string(),
            phone: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(req.present(BookingField::Name), Some("Maria Lopez"));
        assert_eq!(req.present(BookingField::Phone), None);
        assert_eq!(req.present(BookingField::ClientType), None);
    }
}
