//! Risk scoring and the call-transfer decision tree.
//!
//! Score = max matched-pattern score + 0.1 per generic scam keyword, capped
//! at 1.0. Thresholds: > 0.8 high risk, > 0.5 monitored transfer.

use crate::domain::entities::{Recommendation, RiskAssessment, ScreeningDecision};
use crate::domain::patterns::PatternIndex;

/// Generic scam keywords. Each occurrence adds a flat bonus to the score.
pub const GENERIC_SCAM_KEYWORDS: &[&str] =
    &["urgent", "act now", "limited time", "verify", "winner", "prize"];

/// Additive bonus per matched generic keyword.
pub const KEYWORD_BONUS: f64 = 0.1;

/// Score above which a call is high risk (block or warm transfer to contact).
pub const HIGH_RISK_THRESHOLD: f64 = 0.8;

/// Score above which a transferred call stays monitored.
pub const MONITOR_THRESHOLD: f64 = 0.5;

/// Score above which the recommendation is warn-and-monitor.
const WARN_THRESHOLD: f64 = 0.6;

/// Agency names whose impersonation, combined with an arrest threat,
/// triggers an outright block.
const GOVERNMENT_KEYWORDS: &[&str] = &["irs", "fbi", "social security", "medicare"];
const ARREST_KEYWORDS: &[&str] = &["arrest", "warrant", "jail"];

/// Sum of keyword bonuses for `text` (one bonus per distinct keyword found).
pub fn keyword_bonus(text: &str) -> f64 {
    let lower = text.to_lowercase();
    GENERIC_SCAM_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count() as f64
        * KEYWORD_BONUS
}

/// Score `transcript` against the index.
///
/// `scam_threshold` decides `is_scam` (default 0.7, from config).
pub fn assess(index: &PatternIndex, transcript: &str, scam_threshold: f64) -> RiskAssessment {
    let matches = index.query(transcript);
    let base = matches.iter().map(|m| m.score).fold(0.0_f64, f64::max);
    let risk_score = (base + keyword_bonus(transcript)).min(1.0);

    RiskAssessment {
        transcript: transcript.to_string(),
        risk_score,
        is_scam: risk_score > scam_threshold,
        matches,
        recommendation: recommendation_for(risk_score),
    }
}

fn recommendation_for(risk_score: f64) -> Recommendation {
    if risk_score > HIGH_RISK_THRESHOLD {
        Recommendation::BlockAndAlert
    } else if risk_score > WARN_THRESHOLD {
        Recommendation::WarnAndMonitor
    } else {
        Recommendation::TransferNormally
    }
}

/// The transfer decision tree.
///
/// High risk with a government-agency impersonation plus an arrest threat is
/// blocked outright; other high-risk calls warm-transfer to the family
/// contact; mid-risk calls transfer to the senior but stay monitored.
pub fn decide(assessment: &RiskAssessment) -> ScreeningDecision {
    let lower = assessment.transcript.to_lowercase();
    let impersonates_agency = GOVERNMENT_KEYWORDS.iter().any(|k| lower.contains(k));
    let threatens_arrest = ARREST_KEYWORDS.iter().any(|k| lower.contains(k));

    if assessment.risk_score > HIGH_RISK_THRESHOLD {
        if impersonates_agency && threatens_arrest {
            ScreeningDecision::Block {
                reason: "Government impersonation with arrest threat detected".to_string(),
            }
        } else {
            ScreeningDecision::TransferContact
        }
    } else if assessment.risk_score > MONITOR_THRESHOLD {
        ScreeningDecision::TransferMonitored
    } else {
        ScreeningDecision::TransferNormal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PatternSource, ScamPattern, ScamType, UrgencyLevel};

    const THRESHOLD: f64 = 0.7;

    fn index_with(patterns: &[(&str, f64, UrgencyLevel)]) -> PatternIndex {
        PatternIndex::from_patterns(
            patterns
                .iter()
                .map(|(text, weight, urgency)| ScamPattern {
                    text: text.to_string(),
                    weight: *weight,
                    scam_type: ScamType::GeneralFraud,
                    urgency: *urgency,
                    source: PatternSource::SeedPhrase,
                    elderly_specific: true,
                    article_id: None,
                    region: None,
                })
                .collect(),
        )
    }

    #[test]
    fn score_is_sum_of_base_and_keyword_bonuses() {
        let index = index_with(&[("gift card", 0.6, UrgencyLevel::Medium)]);
        // base 0.6, bonuses: "urgent" + "prize" = 0.2
        let a = assess(&index, "urgent: buy a gift card to claim your prize", THRESHOLD);
        assert!((a.risk_score - 0.8).abs() < 1e-9);
        assert!(a.is_scam);
    }

    #[test]
    fn score_is_capped_at_one() {
        let index = index_with(&[("arrest warrant", 0.9, UrgencyLevel::Critical)]);
        let a = assess(
            &index,
            "urgent arrest warrant, verify now to win a prize, act now",
            THRESHOLD,
        );
        assert_eq!(a.risk_score, 1.0);
    }

    #[test]
    fn clean_transcript_scores_zero() {
        let index = index_with(&[("bail money", 0.8, UrgencyLevel::High)]);
        let a = assess(&index, "hello, confirming your appointment tomorrow", THRESHOLD);
        assert_eq!(a.risk_score, 0.0);
        assert!(!a.is_scam);
        assert_eq!(a.recommendation, Recommendation::TransferNormally);
    }

    #[test]
    fn impersonation_with_arrest_threat_is_blocked() {
        let index = index_with(&[("unpaid taxes", 0.9, UrgencyLevel::High)]);
        let a = assess(
            &index,
            "this is the IRS about your unpaid taxes, pay or face arrest",
            THRESHOLD,
        );
        assert!(a.risk_score > HIGH_RISK_THRESHOLD);
        assert!(matches!(decide(&a), ScreeningDecision::Block { .. }));
    }

    #[test]
    fn high_risk_without_arrest_threat_transfers_to_contact() {
        let index = index_with(&[("bail money", 0.9, UrgencyLevel::High)]);
        let a = assess(
            &index,
            "grandma it's me, I need bail money, don't tell mom",
            THRESHOLD,
        );
        assert_eq!(decide(&a), ScreeningDecision::TransferContact);
    }

    #[test]
    fn mid_risk_transfers_monitored() {
        let index = index_with(&[("warranty", 0.6, UrgencyLevel::Medium)]);
        let a = assess(&index, "your car warranty is about to expire", THRESHOLD);
        assert!(a.risk_score > MONITOR_THRESHOLD && a.risk_score <= HIGH_RISK_THRESHOLD);
        assert_eq!(decide(&a), ScreeningDecision::TransferMonitored);
    }
}
