//! Heuristic enhancer: keyword-scan fallback used when no LLM is configured.
//!
//! Simulates network latency so the pipeline behaves like the remote path.

use crate::domain::{
    CallRecord, DomainError, RiskAssessment, Sentiment, TranscriptInsights,
};
use crate::ports::EnhancerPort;
use std::time::Duration;
use tracing::info;

/// Watchlist terms reported back as keywords when present in a transcript.
const WATCHLIST: &[&str] = &[
    "irs", "arrest", "payment", "account", "urgent", "medicare", "prize",
    "bail", "gift card", "warrant", "social security", "virus",
];

/// (cue, trigger terms). The cue is reported when any trigger matches.
const CUE_TRIGGERS: &[(&str, &[&str])] = &[
    ("fear", &["arrest", "police", "jail", "warrant", "lawsuit"]),
    ("urgency", &["urgent", "immediately", "right away", "act now", "expire"]),
    ("manipulation", &["don't tell", "secret", "keep this between", "don't hang up"]),
    ("authority", &["irs", "officer", "agent", "medicare", "government", "fbi"]),
];

/// Heuristic transcript enhancer.
pub struct HeuristicEnhancer {
    /// Simulated processing delay in milliseconds.
    delay_ms: u64,
}

impl HeuristicEnhancer {
    /// Create a new heuristic enhancer with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create an enhancer with custom delay (0 for tests).
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for HeuristicEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EnhancerPort for HeuristicEnhancer {
    async fn enhance(&self, transcript: &str) -> Result<TranscriptInsights, DomainError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let lower = transcript.to_lowercase();

        let keywords: Vec<String> = WATCHLIST
            .iter()
            .filter(|w| lower.contains(*w))
            .map(|w| w.to_string())
            .collect();

        let behavioral_cues: Vec<String> = CUE_TRIGGERS
            .iter()
            .filter(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
            .map(|(cue, _)| cue.to_string())
            .collect();

        let sentiment = if behavioral_cues.iter().any(|c| c == "fear" || c == "urgency") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        info!(
            keywords = keywords.len(),
            cues = behavioral_cues.len(),
            "[heuristic] transcript enhancement"
        );

        Ok(TranscriptInsights {
            keywords,
            sentiment,
            behavioral_cues,
        })
    }

    async fn summarize(
        &self,
        call: &CallRecord,
        assessment: &RiskAssessment,
    ) -> Result<String, DomainError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let preview = call
            .transcripts
            .first()
            .map(|s| s.text.chars().take(100).collect::<String>())
            .unwrap_or_default();

        Ok(format!(
            "Call {} from {} screened with risk score {:.2} ({}). \
             Matched patterns: {}. First words: \"{}\".",
            call.call_id,
            call.caller_number,
            assessment.risk_score,
            if assessment.is_scam {
                "scam indicators present"
            } else {
                "no scam indicators"
            },
            if assessment.matches.is_empty() {
                "none".to_string()
            } else {
                assessment
                    .matches
                    .iter()
                    .map(|m| m.pattern.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
            preview
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallStatus, Recommendation};

    #[tokio::test]
    async fn scam_transcript_yields_negative_insights() {
        let enhancer = HeuristicEnhancer::with_delay(0);
        let insights = enhancer
            .enhance("This is the IRS. Pay immediately or face arrest.")
            .await
            .unwrap();

        assert!(insights.keywords.contains(&"irs".to_string()));
        assert!(insights.behavioral_cues.contains(&"fear".to_string()));
        assert!(insights.behavioral_cues.contains(&"authority".to_string()));
        assert_eq!(insights.sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn benign_transcript_is_neutral() {
        let enhancer = HeuristicEnhancer::with_delay(0);
        let insights = enhancer
            .enhance("Hello, confirming your dentist appointment on Tuesday.")
            .await
            .unwrap();

        assert!(insights.keywords.is_empty());
        assert!(insights.behavioral_cues.is_empty());
        assert_eq!(insights.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn summary_mentions_risk_and_patterns() {
        let enhancer = HeuristicEnhancer::with_delay(0);
        let call = CallRecord {
            call_id: "call_1".to_string(),
            caller_number: "+15550002222".to_string(),
            started_at: 0,
            status: CallStatus::Blocked,
            transcripts: Vec::new(),
            reason: None,
        };
        let assessment = RiskAssessment {
            transcript: String::new(),
            risk_score: 0.9,
            is_scam: true,
            matches: Vec::new(),
            recommendation: Recommendation::BlockAndAlert,
        };

        let summary = enhancer.summarize(&call, &assessment).await.unwrap();
        assert!(summary.contains("0.90"));
        assert!(summary.contains("call_1"));
    }
}
