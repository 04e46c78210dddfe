//! Call-control API gateway. Implements CallGatewayPort against a generic
//! call platform's REST API; mirrors call state into the local registry.

use crate::adapters::telephony::registry::CallRegistry;
use crate::domain::{
    CallRecord, CallStatus, DomainError, Speaker, TranscriptSegment, TransferContext,
    TransferTarget,
};
use crate::ports::CallGatewayPort;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
struct AnswerResponse {
    call_id: String,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    text: String,
}

/// REST call-control adapter.
pub struct ApiCallGateway {
    client: Arc<Client>,
    api_url: String,
    api_key: String,
    registry: CallRegistry,
    contact_number: String,
    senior_number: String,
}

impl ApiCallGateway {
    pub fn new(
        api_url: String,
        api_key: String,
        contact_number: String,
        senior_number: String,
    ) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_url,
            api_key,
            registry: CallRegistry::new(),
            contact_number,
            senior_number,
        }
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, DomainError> {
        let url = format!("{}{}", self.api_url.trim_end_matches('/'), path);
        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::CallGateway(format!("request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::CallGateway(format!(
                "call API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }
        Ok(res)
    }
}

#[async_trait::async_trait]
impl CallGatewayPort for ApiCallGateway {
    async fn answer(
        &self,
        call_id: Option<String>,
        caller_number: &str,
    ) -> Result<CallRecord, DomainError> {
        let res = self
            .post(
                "/calls",
                serde_json::json!({
                    "call_id": call_id,
                    "caller_number": caller_number,
                }),
            )
            .await?;
        let answer: AnswerResponse = res
            .json()
            .await
            .map_err(|e| DomainError::CallGateway(format!("bad answer response: {}", e)))?;

        let record = CallRecord {
            call_id: answer.call_id,
            caller_number: caller_number.to_string(),
            started_at: chrono::Utc::now().timestamp(),
            status: CallStatus::Answering,
            transcripts: Vec::new(),
            reason: None,
        };
        self.registry.insert(record.clone()).await;
        info!(call_id = %record.call_id, caller = %caller_number, "answered call via platform");
        Ok(record)
    }

    async fn transcribe_segment(
        &self,
        call_id: &str,
        window_secs: u32,
    ) -> Result<TranscriptSegment, DomainError> {
        let res = self
            .post(
                &format!("/calls/{}/transcribe", call_id),
                serde_json::json!({ "window_secs": window_secs }),
            )
            .await?;
        let transcribed: TranscribeResponse = res
            .json()
            .await
            .map_err(|e| DomainError::CallGateway(format!("bad transcribe response: {}", e)))?;

        let segment = TranscriptSegment {
            timestamp: chrono::Utc::now().timestamp(),
            duration_secs: window_secs,
            speaker: Speaker::Caller,
            text: transcribed.text,
        };
        self.registry
            .set_status(call_id, CallStatus::Screening, None)
            .await?;
        self.registry.append_segment(call_id, segment.clone()).await?;
        Ok(segment)
    }

    async fn warm_transfer(
        &self,
        call_id: &str,
        target: TransferTarget,
        context: &TransferContext,
    ) -> Result<(), DomainError> {
        let (number, status) = match target {
            TransferTarget::Contact => (&self.contact_number, CallStatus::TransferredToContact),
            TransferTarget::Senior => (&self.senior_number, CallStatus::TransferredToSenior),
        };
        self.post(
            &format!("/calls/{}/transfer", call_id),
            serde_json::json!({
                "number": number,
                "context": context,
            }),
        )
        .await?;
        self.registry.set_status(call_id, status, None).await?;
        info!(call_id, target = ?target, "warm transfer issued");
        Ok(())
    }

    async fn block(&self, call_id: &str, reason: &str) -> Result<(), DomainError> {
        self.post(
            &format!("/calls/{}/block", call_id),
            serde_json::json!({ "reason": reason }),
        )
        .await?;
        self.registry
            .set_status(call_id, CallStatus::Blocked, Some(reason.to_string()))
            .await?;
        info!(call_id, reason, "block issued");
        Ok(())
    }

    async fn monitor(&self, call_id: &str) -> Result<(), DomainError> {
        self.post(&format!("/calls/{}/monitor", call_id), serde_json::json!({}))
            .await?;
        self.registry
            .set_status(call_id, CallStatus::Monitored, None)
            .await?;
        Ok(())
    }

    async fn get_call(&self, call_id: &str) -> Result<Option<CallRecord>, DomainError> {
        Ok(self.registry.get(call_id).await)
    }
}
