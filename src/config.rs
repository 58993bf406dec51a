use std::env;
use std::path::PathBuf;

use anyhow::Context;
use chrono_tz::Tz;

use crate::models::{BookingPolicy, BookingProfile};

pub const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Where the Google service-account key comes from.
#[derive(Clone)]
pub enum CredentialSource {
    Inline(String),
    File(PathBuf),
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Inline(_) => f.write_str("Inline(<redacted>)"),
            CredentialSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub calendar_id: String,
    pub credential_source: CredentialSource,
    pub calendar_api_base: String,
    pub business_name: String,
    pub policy: BookingPolicy,
    pub webhook_secret: String,
    pub admin_token: String,
    pub vapi_private_key: String,
    pub vapi_assistant_id: String,
    pub public_webhook_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid PORT: {v}"))?,
            None => 3000,
        };

        let profile = match var("BOOKING_PROFILE") {
            Some(v) => BookingProfile::parse(&v)
                .with_context(|| format!("invalid BOOKING_PROFILE: {v} (expected lenient or strict)"))?,
            None => BookingProfile::Lenient,
        };
        let mut policy = BookingPolicy::for_profile(profile);

        if let Some(v) = var("DEFAULT_TIMEZONE") {
            policy.timezone = v
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("invalid DEFAULT_TIMEZONE {v}: {e}"))?;
        }
        if let Some(v) = var("SESSION_DURATION_MINUTES") {
            let minutes: u32 = v
                .parse()
                .with_context(|| format!("invalid SESSION_DURATION_MINUTES: {v}"))?;
            anyhow::ensure!(minutes > 0, "SESSION_DURATION_MINUTES must be positive");
            policy.duration_minutes = minutes;
        }
        if let Some(v) = var("INVITE_ATTENDEES") {
            policy.invite_attendees = parse_flag("INVITE_ATTENDEES", &v)?;
        }
        if let Some(v) = var("REJECT_SYNTHETIC_DATA") {
            policy.reject_synthetic = parse_flag("REJECT_SYNTHETIC_DATA", &v)?;
        }

        let credential_source = match var("GOOGLE_SERVICE_ACCOUNT_KEY") {
            Some(json) => CredentialSource::Inline(json),
            None => CredentialSource::File(
                var("GOOGLE_APPLICATION_CREDENTIALS")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("service-account.json")),
            ),
        };

        Ok(Self {
            port,
            calendar_id: var("CAL_ID").unwrap_or_default(),
            credential_source,
            calendar_api_base: var("GOOGLE_CALENDAR_API_BASE")
                .unwrap_or_else(|| DEFAULT_CALENDAR_API_BASE.to_string()),
            business_name: var("BUSINESS_NAME").unwrap_or_else(|| "Mardi".to_string()),
            policy,
            webhook_secret: var("VAPI_WEBHOOK_SECRET").unwrap_or_default(),
            admin_token: var("ADMIN_TOKEN").unwrap_or_default(),
            vapi_private_key: var("VAPI_PRIVATE_KEY").unwrap_or_default(),
            vapi_assistant_id: var("VAPI_ASSISTANT_ID").unwrap_or_default(),
            public_webhook_url: var("PUBLIC_WEBHOOK_URL").unwrap_or_default(),
        })
    }
}

fn parse_flag(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("invalid {key}: {value} (expected true or false)"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.calendar_id, "");
        assert_eq!(config.policy, BookingPolicy::lenient());
        assert_eq!(config.calendar_api_base, DEFAULT_CALENDAR_API_BASE);
        assert!(matches!(
            config.credential_source,
            CredentialSource::File(ref p) if p == &PathBuf::from("service-account.json")
        ));
    }

    #[test]
    fn test_strict_profile_with_overrides() {
        let config = config_from(&[
            ("BOOKING_PROFILE", "strict"),
            ("DEFAULT_TIMEZONE", "Europe/Berlin"),
            ("SESSION_DURATION_MINUTES", "60"),
            ("INVITE_ATTENDEES", "yes"),
        ])
        .unwrap();
        assert_eq!(config.policy.profile, BookingProfile::Strict);
        assert_eq!(config.policy.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.policy.duration_minutes, 60);
        assert!(config.policy.invite_attendees);
        assert!(config.policy.reject_synthetic);
    }

    #[test]
    fn test_default_timezone_accepts_documented_value() {
        let config = config_from(&[("DEFAULT_TIMEZONE", "Asia/Tbilisi")]).unwrap();
        assert_eq!(config.policy.timezone, chrono_tz::Asia::Tbilisi);
        assert_eq!(config_from(&[]).unwrap().policy.timezone.name(), "Asia/Tbilisi");
    }

    #[test]
    fn test_synthetic_gate_on_by_default_with_opt_out() {
        assert!(config_from(&[]).unwrap().policy.reject_synthetic);
        let config = config_from(&[("REJECT_SYNTHETIC_DATA", "false")]).unwrap();
        assert!(!config.policy.reject_synthetic);
    }

    #[test]
    fn test_inline_key_wins_over_path() {
        let config = config_from(&[
            ("GOOGLE_SERVICE_ACCOUNT_KEY", "{\"type\":\"service_account\"}"),
            ("GOOGLE_APPLICATION_CREDENTIALS", "/etc/key.json"),
        ])
        .unwrap();
        assert!(matches!(config.credential_source, CredentialSource::Inline(_)));
        assert_eq!(format!("{:?}", config.credential_source), "Inline(<redacted>)");
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config_from(&[("BOOKING_PROFILE", "relaxed")]).is_err());
        assert!(config_from(&[("DEFAULT_TIMEZONE", "Mars/Olympus")]).is_err());
        assert!(config_from(&[("SESSION_DURATION_MINUTES", "0")]).is_err());
        assert!(config_from(&[("INVITE_ATTENDEES", "maybe")]).is_err());
        assert!(config_from(&[("PORT", "http")]).is_err());
    }
}
