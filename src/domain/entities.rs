//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// A call currently or previously handled by the screening service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: String,
    pub caller_number: String,
    /// Unix timestamp of when the call was answered.
    pub started_at: i64,
    pub status: CallStatus,
    pub transcripts: Vec<TranscriptSegment>,
    /// Block or transfer reason, when a screening decision set one.
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Answering,
    Screening,
    TransferredToContact,
    TransferredToSenior,
    Monitored,
    Blocked,
}

/// One transcribed slice of a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub timestamp: i64,
    pub duration_secs: u32,
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Caller,
    Screener,
}

/// Indexed scam pattern: a phrase matched against transcripts by substring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScamPattern {
    pub text: String,
    /// Hand-tuned additive weight in (0, 1].
    pub weight: f64,
    pub scam_type: ScamType,
    pub urgency: UrgencyLevel,
    pub source: PatternSource,
    pub elderly_specific: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub article_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSource {
    SeedPhrase,
    Article,
    FeedWebhook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamType {
    GrandparentScam,
    GovernmentImpersonation,
    MedicareFraud,
    LotteryScam,
    TechSupport,
    RomanceScam,
    GeneralFraud,
}

impl ScamType {
    /// Classify from indicator phrases (joined, lowercased substring checks).
    pub fn classify(indicators: &[String]) -> Self {
        let joined = indicators.join(" ").to_lowercase();
        if joined.contains("grandchild")
            || joined.contains("bail")
            || joined.contains("family emergency")
        {
            ScamType::GrandparentScam
        } else if joined.contains("irs") || joined.contains("tax") || joined.contains("arrest") {
            ScamType::GovernmentImpersonation
        } else if joined.contains("medicare")
            || joined.contains("health")
            || joined.contains("benefits")
        {
            ScamType::MedicareFraud
        } else if joined.contains("prize") || joined.contains("lottery") || joined.contains("winner")
        {
            ScamType::LotteryScam
        } else if joined.contains("virus")
            || joined.contains("tech support")
            || joined.contains("microsoft")
        {
            ScamType::TechSupport
        } else if joined.contains("romance") || joined.contains("dating") {
            ScamType::RomanceScam
        } else {
            ScamType::GeneralFraud
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScamType::GrandparentScam => "grandparent_scam",
            ScamType::GovernmentImpersonation => "government_impersonation",
            ScamType::MedicareFraud => "medicare_fraud",
            ScamType::LotteryScam => "lottery_scam",
            ScamType::TechSupport => "tech_support",
            ScamType::RomanceScam => "romance_scam",
            ScamType::GeneralFraud => "general_fraud",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    /// Score multiplier applied to a matched pattern's weight.
    pub fn multiplier(&self) -> f64 {
        match self {
            UrgencyLevel::Medium => 1.0,
            UrgencyLevel::High => 1.2,
            UrgencyLevel::Critical => 1.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
            UrgencyLevel::Critical => "critical",
        }
    }
}

/// A scam-news article collected from a feed (or a fixture when offline).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    /// RFC 3339 publication timestamp as reported by the feed.
    pub published: String,
    pub source: String,
    pub scam_type: ScamType,
    pub urgency: UrgencyLevel,
    pub elderly_specific: bool,
    pub key_indicators: Vec<String>,
}

/// One pattern that matched a transcript, with its contribution to the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: String,
    pub score: f64,
    pub scam_type: ScamType,
    pub urgency: UrgencyLevel,
}

/// Outcome of scoring a transcript against the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub transcript: String,
    /// In [0.0, 1.0]; capped.
    pub risk_score: f64,
    pub is_scam: bool,
    pub matches: Vec<PatternMatch>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    BlockAndAlert,
    WarnAndMonitor,
    TransferNormally,
}

/// What the screening orchestrator decided to do with a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ScreeningDecision {
    Block { reason: String },
    TransferContact,
    TransferMonitored,
    TransferNormal,
}

/// Where a warm transfer routes the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferTarget {
    Contact,
    Senior,
}

/// Context handed to the transfer target alongside the call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferContext {
    pub risk_score: f64,
    pub matched_patterns: Vec<String>,
    pub transcript_preview: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alert: Option<String>,
}

/// Output of the transcript enhancement step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptInsights {
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub behavioral_cues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

/// Elderly-vulnerability buckets extracted from collected articles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElderlyInsights {
    pub high_risk_phrases: Vec<String>,
    pub emotional_triggers: Vec<String>,
    pub urgency_tactics: Vec<String>,
    pub impersonation_types: Vec<String>,
}

/// Security incident log entry (blocked calls, alert failures).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub timestamp: i64,
    pub call_id: String,
    pub kind: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_grandparent_scam() {
        let indicators = vec!["bail money".to_string(), "grandchild in trouble".to_string()];
        assert_eq!(ScamType::classify(&indicators), ScamType::GrandparentScam);
    }

    #[test]
    fn classify_defaults_to_general_fraud() {
        let indicators = vec!["something odd".to_string()];
        assert_eq!(ScamType::classify(&indicators), ScamType::GeneralFraud);
    }

    #[test]
    fn urgency_multipliers_are_ordered() {
        assert!(UrgencyLevel::Medium.multiplier() < UrgencyLevel::High.multiplier());
        assert!(UrgencyLevel::High.multiplier() < UrgencyLevel::Critical.multiplier());
    }
}
