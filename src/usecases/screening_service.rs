//! Call screening orchestration: answer -> transcribe -> enhance -> score ->
//! decide -> act -> alert -> log.
//!
//! Every side step (enhancement, alerting, reporting, logging) is
//! best-effort: a failure is logged and screening continues.

use crate::domain::{
    risk, CallRecord, DomainError, PatternIndex, RiskAssessment, ScreeningDecision,
    TranscriptInsights, TransferContext, TransferTarget,
};
use crate::ports::{AlertPort, CallGatewayPort, CallLogPort, EnhancerPort};
use crate::usecases::ReportService;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Result of screening one incoming call.
#[derive(Debug)]
pub struct ScreeningOutcome {
    pub call_id: String,
    pub decision: ScreeningDecision,
    pub assessment: RiskAssessment,
    pub insights: Option<TranscriptInsights>,
}

/// Result of handling a platform scam-alert webhook.
#[derive(Debug)]
pub struct AlertOutcome {
    pub message: String,
    pub decision: Option<ScreeningDecision>,
}

/// Screening service. Orchestrates the gateway, enhancer, index, and alerts.
pub struct ScreeningService {
    gateway: Arc<dyn CallGatewayPort>,
    enhancer: Arc<dyn EnhancerPort>,
    alerts: Option<Arc<dyn AlertPort>>,
    call_log: Arc<dyn CallLogPort>,
    index: Arc<RwLock<PatternIndex>>,
    reports: Arc<ReportService>,
    scam_threshold: f64,
    transcribe_window_secs: u32,
}

impl ScreeningService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gateway: Arc<dyn CallGatewayPort>,
        enhancer: Arc<dyn EnhancerPort>,
        alerts: Option<Arc<dyn AlertPort>>,
        call_log: Arc<dyn CallLogPort>,
        index: Arc<RwLock<PatternIndex>>,
        reports: Arc<ReportService>,
        scam_threshold: f64,
        transcribe_window_secs: u32,
    ) -> Self {
        Self {
            gateway,
            enhancer,
            alerts,
            call_log,
            index,
            reports,
            scam_threshold,
            transcribe_window_secs,
        }
    }

    /// Screen an incoming call end to end.
    pub async fn handle_incoming_call(
        &self,
        call_id: Option<String>,
        caller_number: &str,
    ) -> Result<ScreeningOutcome, DomainError> {
        // Step 1: answer
        let record = self.gateway.answer(call_id, caller_number).await?;
        let call_id = record.call_id.clone();

        // Step 2: initial transcript
        let segment = self
            .gateway
            .transcribe_segment(&call_id, self.transcribe_window_secs)
            .await?;

        // Step 3: enhancement (best-effort)
        let insights = match self.enhancer.enhance(&segment.text).await {
            Ok(i) => Some(i),
            Err(e) => {
                warn!(call_id = %call_id, error = %e, "transcript enhancement failed");
                None
            }
        };

        // Step 4: score against the index
        let assessment = {
            let index = self.index.read().await;
            risk::assess(&index, &segment.text, self.scam_threshold)
        };

        // Step 5: decide and act
        let decision = risk::decide(&assessment);
        info!(
            call_id = %call_id,
            risk_score = assessment.risk_score,
            decision = ?decision,
            "screening decision"
        );
        self.execute_decision(&call_id, &decision, &assessment).await?;

        // Audit trail: call log + report, both best-effort
        if let Ok(Some(call)) = self.gateway.get_call(&call_id).await {
            if let Err(e) = self.call_log.append(&call).await {
                warn!(call_id = %call_id, error = %e, "failed to append call log");
            }
            self.write_report(&call, &assessment, &decision).await;
        }

        Ok(ScreeningOutcome {
            call_id,
            decision,
            assessment,
            insights,
        })
    }

    /// Handle a scam-alert webhook from the call platform.
    ///
    /// `scam == false` sends the approval notice. Otherwise the transcript is
    /// re-assessed and the decision mapped to a gateway action when the call
    /// is still known.
    pub async fn handle_scam_alert(
        &self,
        call_id: Option<&str>,
        scam: bool,
        reason: &str,
        transcript: &str,
    ) -> Result<AlertOutcome, DomainError> {
        if !scam {
            let message = approval_message(reason, transcript);
            self.notify(&message).await;
            return Ok(AlertOutcome {
                message,
                decision: None,
            });
        }

        let assessment = {
            let index = self.index.read().await;
            risk::assess(&index, transcript, self.scam_threshold)
        };
        let decision = risk::decide(&assessment);

        if let Some(call_id) = call_id {
            // The platform may report calls we never answered; act only on known ones
            match self.execute_decision(call_id, &decision, &assessment).await {
                Ok(()) => {}
                Err(DomainError::CallNotFound(_)) => {
                    warn!(call_id, "scam alert for unknown call; alerting only");
                }
                Err(e) => return Err(e),
            }
        }

        let message = interception_message(reason, transcript);
        self.notify(&message).await;

        Ok(AlertOutcome {
            message,
            decision: Some(decision),
        })
    }

    async fn execute_decision(
        &self,
        call_id: &str,
        decision: &ScreeningDecision,
        assessment: &RiskAssessment,
    ) -> Result<(), DomainError> {
        let context = transfer_context(assessment, matches!(decision, ScreeningDecision::TransferContact));

        match decision {
            ScreeningDecision::Block { reason } => {
                self.gateway.block(call_id, reason).await?;
                self.notify(&interception_message(reason, &assessment.transcript))
                    .await;
            }
            ScreeningDecision::TransferContact => {
                self.gateway
                    .warm_transfer(call_id, TransferTarget::Contact, &context)
                    .await?;
                self.notify(&interception_message(
                    "High-risk call warm-transferred to you",
                    &assessment.transcript,
                ))
                .await;
            }
            ScreeningDecision::TransferMonitored => {
                self.gateway
                    .warm_transfer(call_id, TransferTarget::Senior, &context)
                    .await?;
                self.gateway.monitor(call_id).await?;
            }
            ScreeningDecision::TransferNormal => {
                self.gateway
                    .warm_transfer(call_id, TransferTarget::Senior, &context)
                    .await?;
            }
        }
        Ok(())
    }

    /// Deliver an alert, or log it when no alert channel is configured.
    async fn notify(&self, message: &str) {
        match &self.alerts {
            Some(alerts) => {
                if let Err(e) = alerts.send(message).await {
                    warn!(error = %e, "alert delivery failed");
                }
            }
            None => info!(alert = %message, "alert channel not configured; logging only"),
        }
    }

    async fn write_report(
        &self,
        call: &CallRecord,
        assessment: &RiskAssessment,
        decision: &ScreeningDecision,
    ) {
        let summary = match self.enhancer.summarize(call, assessment).await {
            Ok(s) => s,
            Err(e) => {
                warn!(call_id = %call.call_id, error = %e, "summary generation failed");
                String::new()
            }
        };
        if let Err(e) = self.reports.generate(call, assessment, decision, &summary).await {
            warn!(call_id = %call.call_id, error = %e, "report generation failed");
        }
    }
}

fn transfer_context(assessment: &RiskAssessment, high_risk: bool) -> TransferContext {
    TransferContext {
        risk_score: assessment.risk_score,
        matched_patterns: assessment.matches.iter().map(|m| m.pattern.clone()).collect(),
        transcript_preview: assessment.transcript.chars().take(100).collect(),
        alert: high_risk.then(|| "SCAM ALERT: High-risk call detected".to_string()),
    }
}

fn interception_message(reason: &str, transcript: &str) -> String {
    format!(
        "We have intercepted a call between a suspected scammer and your elder\n\n\
         Reason for interception: {}\n\nTranscript: {}",
        reason, transcript
    )
}

fn approval_message(reason: &str, transcript: &str) -> String {
    format!(
        "We have approved a call between an unidentified number and your elder\n\n\
         Reason for approval: {}\n\nTranscript: {}",
        reason, transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::enhancement::HeuristicEnhancer;
    use crate::adapters::persistence::CallLog;
    use crate::adapters::telephony::SimCallGateway;
    use crate::domain::{PatternSource, ScamPattern, ScamType, UrgencyLevel};
    use tokio::sync::Mutex;

    /// Test alert channel that records every message.
    struct RecordingAlert {
        sent: Mutex<Vec<String>>,
    }

    impl RecordingAlert {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl AlertPort for RecordingAlert {
        async fn send(&self, message: &str) -> Result<(), DomainError> {
            self.sent.lock().await.push(message.to_string());
            Ok(())
        }
    }

    fn index_with_patterns() -> Arc<RwLock<PatternIndex>> {
        let patterns = vec![
            ("unpaid taxes", ScamType::GovernmentImpersonation, UrgencyLevel::Critical),
            ("bail money", ScamType::GrandparentScam, UrgencyLevel::High),
            ("bank account", ScamType::LotteryScam, UrgencyLevel::High),
        ]
        .into_iter()
        .map(|(text, scam_type, urgency)| ScamPattern {
            text: text.to_string(),
            weight: 0.8,
            scam_type,
            urgency,
            source: PatternSource::SeedPhrase,
            elderly_specific: true,
            article_id: None,
            region: None,
        })
        .collect();
        Arc::new(RwLock::new(PatternIndex::from_patterns(patterns)))
    }

    fn service(
        dir: &std::path::Path,
        alerts: Option<Arc<dyn AlertPort>>,
    ) -> (ScreeningService, Arc<SimCallGateway>) {
        let gateway = Arc::new(SimCallGateway::new(
            "+1-555-0100".to_string(),
            "+1-555-0199".to_string(),
        ));
        let service = ScreeningService::new(
            gateway.clone(),
            Arc::new(HeuristicEnhancer::with_delay(0)),
            alerts,
            Arc::new(CallLog::new(dir.join("calls"))),
            index_with_patterns(),
            Arc::new(ReportService::new(dir.join("reports"))),
            0.7,
            5,
        );
        (service, gateway)
    }

    #[tokio::test]
    async fn scam_alert_with_impersonation_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let alerts = RecordingAlert::new();
        let (service, gateway) = service(dir.path(), Some(alerts.clone()));

        let record = gateway.answer(None, "+15550008888").await.unwrap();
        let outcome = service
            .handle_scam_alert(
                Some(&record.call_id),
                true,
                "Caller claimed to be from the IRS demanding payment",
                "This is the IRS about unpaid taxes, pay now or face arrest",
            )
            .await
            .unwrap();

        assert!(matches!(
            outcome.decision,
            Some(ScreeningDecision::Block { .. })
        ));
        let sent = alerts.sent.lock().await;
        // Block path sends one notice from the decision and one for the webhook
        assert!(!sent.is_empty());
        assert!(sent[0].contains("intercepted"));
    }

    #[tokio::test]
    async fn safe_alert_sends_approval_notice() {
        let dir = tempfile::tempdir().unwrap();
        let alerts = RecordingAlert::new();
        let (service, _) = service(dir.path(), Some(alerts.clone()));

        let outcome = service
            .handle_scam_alert(
                None,
                false,
                "Caller verified as the doctor's office",
                "Confirming your appointment tomorrow",
            )
            .await
            .unwrap();

        assert!(outcome.decision.is_none());
        assert!(outcome.message.contains("approved"));
        let sent = alerts.sent.lock().await;
        assert_eq!(sent.len(), 1);
    }

    #[tokio::test]
    async fn scam_alert_for_unknown_call_still_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let alerts = RecordingAlert::new();
        let (service, _) = service(dir.path(), Some(alerts.clone()));

        let outcome = service
            .handle_scam_alert(
                Some("never_answered"),
                true,
                "reported by platform",
                "grandma I need bail money urgently, don't tell anyone",
            )
            .await
            .unwrap();

        assert!(outcome.decision.is_some());
        assert!(!alerts.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn incoming_call_is_screened_and_logged() {
        let dir = tempfile::tempdir().unwrap();
        let (service, gateway) = service(dir.path(), None);

        let outcome = service
            .handle_incoming_call(None, "+15550009999")
            .await
            .unwrap();

        // Decision is consistent with the assessment the service produced
        assert_eq!(risk::decide(&outcome.assessment), outcome.decision);
        assert!(outcome.insights.is_some());

        // Call exists with the transcript attached
        let call = gateway.get_call(&outcome.call_id).await.unwrap().unwrap();
        assert_eq!(call.transcripts.len(), 1);

        // Call log has one JSONL file with one line
        let mut entries = tokio::fs::read_dir(dir.path().join("calls")).await.unwrap();
        let entry = entries.next_entry().await.unwrap().expect("call log file");
        let content = tokio::fs::read_to_string(entry.path()).await.unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
