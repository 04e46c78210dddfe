//! In-memory registry of active calls, shared by the call gateways.

use crate::domain::{CallRecord, CallStatus, DomainError, TranscriptSegment};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Active call registry: call_id -> record.
#[derive(Default)]
pub struct CallRegistry {
    inner: RwLock<HashMap<String, CallRecord>>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: CallRecord) {
        self.inner
            .write()
            .await
            .insert(record.call_id.clone(), record);
    }

    pub async fn get(&self, call_id: &str) -> Option<CallRecord> {
        self.inner.read().await.get(call_id).cloned()
    }

    /// Append a transcript segment. Errors when the call is unknown.
    pub async fn append_segment(
        &self,
        call_id: &str,
        segment: TranscriptSegment,
    ) -> Result<(), DomainError> {
        let mut map = self.inner.write().await;
        let record = map
            .get_mut(call_id)
            .ok_or_else(|| DomainError::CallNotFound(call_id.to_string()))?;
        record.transcripts.push(segment);
        Ok(())
    }

    /// Update status (and optionally the reason). Errors when unknown.
    pub async fn set_status(
        &self,
        call_id: &str,
        status: CallStatus,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        let mut map = self.inner.write().await;
        let record = map
            .get_mut(call_id)
            .ok_or_else(|| DomainError::CallNotFound(call_id.to_string()))?;
        record.status = status;
        if reason.is_some() {
            record.reason = reason;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Speaker;

    fn record(call_id: &str) -> CallRecord {
        CallRecord {
            call_id: call_id.to_string(),
            caller_number: "+15550003333".to_string(),
            started_at: 0,
            status: CallStatus::Answering,
            transcripts: Vec::new(),
            reason: None,
        }
    }

    #[tokio::test]
    async fn unknown_call_is_an_error() {
        let registry = CallRegistry::new();
        let err = registry
            .set_status("nope", CallStatus::Blocked, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CallNotFound(_)));
    }

    #[tokio::test]
    async fn segments_and_status_are_tracked() {
        let registry = CallRegistry::new();
        registry.insert(record("call_1")).await;

        registry
            .append_segment(
                "call_1",
                TranscriptSegment {
                    timestamp: 1,
                    duration_secs: 5,
                    speaker: Speaker::Caller,
                    text: "hello".to_string(),
                },
            )
            .await
            .unwrap();
        registry
            .set_status("call_1", CallStatus::Blocked, Some("scam".to_string()))
            .await
            .unwrap();

        let call = registry.get("call_1").await.unwrap();
        assert_eq!(call.transcripts.len(), 1);
        assert_eq!(call.status, CallStatus::Blocked);
        assert_eq!(call.reason.as_deref(), Some("scam"));
    }
}
