//! SMS adapter. Implements AlertPort by sending messages via an SMS REST API.

use crate::domain::DomainError;
use crate::ports::AlertPort;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// SMS gateway adapter for family alerts.
///
/// Posts `{from, to, text}` with bearer auth to the configured endpoint.
pub struct SmsAdapter {
    client: Arc<Client>,
    api_url: String,
    api_key: String,
    from: String,
    to: String,
}

impl SmsAdapter {
    /// Create a new SMS adapter.
    ///
    /// # Arguments
    /// * `api_url` - Messages endpoint of the SMS provider
    /// * `api_key` - Provider API key
    /// * `from` - Sender number (E.164)
    /// * `to` - Family contact number (E.164)
    pub fn new(api_url: String, api_key: String, from: String, to: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_url,
            api_key,
            from,
            to,
        }
    }
}

#[async_trait::async_trait]
impl AlertPort for SmsAdapter {
    async fn send(&self, message: &str) -> Result<(), DomainError> {
        let body = serde_json::json!({
            "from": self.from,
            "to": self.to,
            "text": message,
            "type": "SMS",
        });

        let res = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Alert(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Alert(format!(
                "SMS API error {}: {}",
                status, text
            )));
        }

        info!(to = %self.to, chars = message.len(), "alert SMS sent");
        Ok(())
    }
}
