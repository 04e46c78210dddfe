//! Simulated call gateway for development and demos without a platform.
//!
//! Transcription picks a fixture transcript deterministically from the
//! caller number, so a given caller always produces the same scenario.

use crate::adapters::telephony::registry::CallRegistry;
use crate::domain::{
    CallRecord, CallStatus, DomainError, Incident, Speaker, TranscriptSegment, TransferContext,
    TransferTarget,
};
use crate::ports::CallGatewayPort;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

const GREETING: &str =
    "Hello, you've reached the call screening service. Please hold while we connect your call.";

const BLOCK_MESSAGE: &str = "This call has been identified as potentially fraudulent and has \
     been blocked. If you believe this is an error, please contact support.";

const TRANSFER_MESSAGE: &str =
    "One moment please, I'm transferring you to the authorized contact.";

/// Fixture transcripts covering the demo scenarios.
const FIXTURE_TRANSCRIPTS: &[&str] = &[
    "This is the IRS calling about your unpaid taxes. You must pay immediately or face arrest.",
    "Hi grandma, it's me. I'm in trouble and need bail money. Please don't tell mom.",
    "Hello, this is your doctor's office calling to confirm your appointment tomorrow.",
    "You've won a million dollars! Just need your bank account to deposit the prize.",
];

/// Simulated call gateway.
pub struct SimCallGateway {
    registry: CallRegistry,
    contact_number: String,
    senior_number: String,
    seq: AtomicU64,
}

impl SimCallGateway {
    pub fn new(contact_number: String, senior_number: String) -> Self {
        Self {
            registry: CallRegistry::new(),
            contact_number,
            senior_number,
            seq: AtomicU64::new(1),
        }
    }

    /// Deterministic fixture selection: hash the caller number.
    fn fixture_for(caller_number: &str) -> &'static str {
        let mut hasher = DefaultHasher::new();
        caller_number.hash(&mut hasher);
        let idx = (hasher.finish() as usize) % FIXTURE_TRANSCRIPTS.len();
        FIXTURE_TRANSCRIPTS[idx]
    }

    fn log_incident(&self, call_id: &str, kind: &str, details: &str) {
        let incident = Incident {
            timestamp: chrono::Utc::now().timestamp(),
            call_id: call_id.to_string(),
            kind: kind.to_string(),
            details: details.to_string(),
        };
        warn!(
            incident = %serde_json::to_string(&incident).unwrap_or_default(),
            "incident logged"
        );
    }
}

#[async_trait::async_trait]
impl CallGatewayPort for SimCallGateway {
    async fn answer(
        &self,
        call_id: Option<String>,
        caller_number: &str,
    ) -> Result<CallRecord, DomainError> {
        let now = chrono::Utc::now().timestamp();
        let call_id = call_id.unwrap_or_else(|| {
            format!("call_{}_{}", now, self.seq.fetch_add(1, Ordering::Relaxed))
        });

        let record = CallRecord {
            call_id: call_id.clone(),
            caller_number: caller_number.to_string(),
            started_at: now,
            status: CallStatus::Answering,
            transcripts: Vec::new(),
            reason: None,
        };
        self.registry.insert(record.clone()).await;

        info!(call_id = %call_id, caller = %caller_number, greeting = GREETING, "answered call");
        Ok(record)
    }

    async fn transcribe_segment(
        &self,
        call_id: &str,
        window_secs: u32,
    ) -> Result<TranscriptSegment, DomainError> {
        let call = self
            .registry
            .get(call_id)
            .await
            .ok_or_else(|| DomainError::CallNotFound(call_id.to_string()))?;

        let segment = TranscriptSegment {
            timestamp: chrono::Utc::now().timestamp(),
            duration_secs: window_secs,
            speaker: Speaker::Caller,
            text: Self::fixture_for(&call.caller_number).to_string(),
        };
        self.registry
            .set_status(call_id, CallStatus::Screening, None)
            .await?;
        self.registry.append_segment(call_id, segment.clone()).await?;

        info!(
            call_id,
            window_secs,
            preview = %segment.text.chars().take(50).collect::<String>(),
            "transcribed segment"
        );
        Ok(segment)
    }

    async fn warm_transfer(
        &self,
        call_id: &str,
        target: TransferTarget,
        context: &TransferContext,
    ) -> Result<(), DomainError> {
        let (number, status, reason) = match target {
            TransferTarget::Contact => (
                &self.contact_number,
                CallStatus::TransferredToContact,
                Some("high_risk_scam".to_string()),
            ),
            TransferTarget::Senior => (&self.senior_number, CallStatus::TransferredToSenior, None),
        };
        self.registry.set_status(call_id, status, reason).await?;

        info!(
            call_id,
            target = ?target,
            number = %number,
            risk_score = context.risk_score,
            caller_message = TRANSFER_MESSAGE,
            "warm transfer"
        );
        if !context.matched_patterns.is_empty() {
            info!(
                call_id,
                patterns = %context.matched_patterns.join(", "),
                "transfer context handed off"
            );
        }
        Ok(())
    }

    async fn block(&self, call_id: &str, reason: &str) -> Result<(), DomainError> {
        self.registry
            .set_status(call_id, CallStatus::Blocked, Some(reason.to_string()))
            .await?;
        info!(call_id, reason, message = BLOCK_MESSAGE, "blocked call");
        self.log_incident(call_id, "call_blocked", reason);
        Ok(())
    }

    async fn monitor(&self, call_id: &str) -> Result<(), DomainError> {
        self.registry
            .set_status(call_id, CallStatus::Monitored, None)
            .await?;
        info!(call_id, "monitoring call for suspicious activity");
        Ok(())
    }

    async fn get_call(&self, call_id: &str) -> Result<Option<CallRecord>, DomainError> {
        Ok(self.registry.get(call_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> SimCallGateway {
        SimCallGateway::new("+1-555-0100".to_string(), "+1-555-0199".to_string())
    }

    #[tokio::test]
    async fn answer_registers_the_call() {
        let gw = gateway();
        let record = gw.answer(None, "+15550004444").await.unwrap();
        assert_eq!(record.status, CallStatus::Answering);
        assert!(gw.get_call(&record.call_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn transcription_is_deterministic_per_caller() {
        let gw = gateway();
        let a = gw.answer(None, "+15550004444").await.unwrap();
        let b = gw.answer(None, "+15550004444").await.unwrap();

        let seg_a = gw.transcribe_segment(&a.call_id, 5).await.unwrap();
        let seg_b = gw.transcribe_segment(&b.call_id, 5).await.unwrap();
        assert_eq!(seg_a.text, seg_b.text);
    }

    #[tokio::test]
    async fn transcribing_unknown_call_fails() {
        let gw = gateway();
        let err = gw.transcribe_segment("missing", 5).await.unwrap_err();
        assert!(matches!(err, DomainError::CallNotFound(_)));
    }

    #[tokio::test]
    async fn block_sets_status_and_reason() {
        let gw = gateway();
        let record = gw.answer(None, "+15550005555").await.unwrap();
        gw.block(&record.call_id, "impersonation").await.unwrap();

        let call = gw.get_call(&record.call_id).await.unwrap().unwrap();
        assert_eq!(call.status, CallStatus::Blocked);
        assert_eq!(call.reason.as_deref(), Some("impersonation"));
    }

    #[tokio::test]
    async fn transfers_update_status_by_target() {
        let gw = gateway();
        let record = gw.answer(None, "+15550006666").await.unwrap();
        gw.warm_transfer(
            &record.call_id,
            TransferTarget::Senior,
            &TransferContext::default(),
        )
        .await
        .unwrap();

        let call = gw.get_call(&record.call_id).await.unwrap().unwrap();
        assert_eq!(call.status, CallStatus::TransferredToSenior);
    }
}
