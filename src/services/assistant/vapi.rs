use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

use super::AssistantPlatform;

const VAPI_API_BASE: &str = "https://api.vapi.ai";

pub struct VapiClient {
    private_key: String,
    client: reqwest::Client,
}

impl VapiClient {
    pub fn new(private_key: String) -> Self {
        Self {
            private_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AssistantPlatform for VapiClient {
    async fn update_assistant(&self, assistant_id: &str, config: &Value) -> anyhow::Result<()> {
        anyhow::ensure!(!self.private_key.is_empty(), "VAPI_PRIVATE_KEY is not set");

        let resp = self
            .client
            .patch(format!("{VAPI_API_BASE}/assistant/{assistant_id}"))
            .bearer_auth(&self.private_key)
            .json(config)
            .send()
            .await
            .context("failed to call Vapi API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Vapi API error ({}): {}", status, body);
        }

        Ok(())
    }
}
