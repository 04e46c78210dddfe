//! Pattern index: the scam-phrase lookup the screening flow queries.
//!
//! Substring matching only, no embeddings. A pattern matches a transcript
//! when the transcript contains the pattern text (case-insensitive). Each
//! match contributes `weight * urgency multiplier`, capped at 1.0.

use crate::domain::entities::{PatternMatch, ScamPattern};
use serde::Serialize;
use std::collections::HashMap;

/// How many pattern texts `stats()` reports as recent trends.
const TREND_SAMPLE: usize = 3;

/// In-memory index of scam patterns.
#[derive(Debug, Default)]
pub struct PatternIndex {
    patterns: Vec<ScamPattern>,
}

impl PatternIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_patterns(patterns: Vec<ScamPattern>) -> Self {
        Self { patterns }
    }

    /// Add newly extracted patterns (knowledge updates).
    pub fn extend(&mut self, patterns: Vec<ScamPattern>) {
        self.patterns.extend(patterns);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[ScamPattern] {
        &self.patterns
    }

    /// Match all indexed patterns against `transcript`.
    ///
    /// Returns one `PatternMatch` per matching pattern, each scored
    /// `weight * urgency multiplier` and capped at 1.0.
    pub fn query(&self, transcript: &str) -> Vec<PatternMatch> {
        let haystack = transcript.to_lowercase();
        self.patterns
            .iter()
            .filter(|p| !p.text.is_empty() && haystack.contains(&p.text.to_lowercase()))
            .map(|p| PatternMatch {
                pattern: p.text.clone(),
                score: (p.weight * p.urgency.multiplier()).min(1.0),
                scam_type: p.scam_type,
                urgency: p.urgency,
            })
            .collect()
    }

    /// Counts by scam type and urgency level, plus a short trend sample.
    pub fn stats(&self) -> IndexStats {
        let mut by_type: HashMap<&'static str, usize> = HashMap::new();
        let mut by_urgency: HashMap<&'static str, usize> = HashMap::new();
        for p in &self.patterns {
            *by_type.entry(p.scam_type.as_str()).or_default() += 1;
            *by_urgency.entry(p.urgency.as_str()).or_default() += 1;
        }
        IndexStats {
            total_patterns: self.patterns.len(),
            scam_types: by_type,
            urgency_levels: by_urgency,
            recent_trends: self
                .patterns
                .iter()
                .take(TREND_SAMPLE)
                .map(|p| p.text.clone())
                .collect(),
        }
    }
}

/// Snapshot of index composition for reporting.
#[derive(Debug, Serialize)]
pub struct IndexStats {
    pub total_patterns: usize,
    pub scam_types: HashMap<&'static str, usize>,
    pub urgency_levels: HashMap<&'static str, usize>,
    pub recent_trends: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PatternSource, ScamType, UrgencyLevel};

    fn pattern(text: &str, weight: f64, urgency: UrgencyLevel) -> ScamPattern {
        ScamPattern {
            text: text.to_string(),
            weight,
            scam_type: ScamType::GeneralFraud,
            urgency,
            source: PatternSource::SeedPhrase,
            elderly_specific: true,
            article_id: None,
            region: None,
        }
    }

    #[test]
    fn query_matches_case_insensitive_substring() {
        let index = PatternIndex::from_patterns(vec![pattern(
            "gift card",
            0.7,
            UrgencyLevel::Medium,
        )]);
        let matches = index.query("Please buy a GIFT CARD right away");
        assert_eq!(matches.len(), 1);
        assert!((matches[0].score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn per_match_score_is_capped() {
        let index = PatternIndex::from_patterns(vec![pattern(
            "arrest warrant",
            0.9,
            UrgencyLevel::Critical,
        )]);
        // 0.9 * 1.5 = 1.35, capped at 1.0
        let matches = index.query("there is an arrest warrant out for you");
        assert_eq!(matches[0].score, 1.0);
    }

    #[test]
    fn query_returns_empty_for_clean_transcript() {
        let index = PatternIndex::from_patterns(vec![pattern(
            "bail money",
            0.8,
            UrgencyLevel::High,
        )]);
        assert!(index
            .query("calling to confirm your appointment tomorrow")
            .is_empty());
    }

    #[test]
    fn stats_counts_types_and_urgencies() {
        let mut index = PatternIndex::from_patterns(vec![
            pattern("a", 0.5, UrgencyLevel::Medium),
            pattern("b", 0.5, UrgencyLevel::Critical),
        ]);
        index.extend(vec![pattern("c", 0.5, UrgencyLevel::Critical)]);

        let stats = index.stats();
        assert_eq!(stats.total_patterns, 3);
        assert_eq!(stats.urgency_levels.get("critical"), Some(&2));
        assert_eq!(stats.recent_trends.len(), 3);
    }
}
