//! Article processing: indicator extraction, classification, dedup, and
//! conversion of collected intelligence into indexable patterns.

use crate::domain::{
    ElderlyInsights, NewsArticle, PatternSource, ScamPattern, ScamType, UrgencyLevel,
};
use serde::Deserialize;

/// Weight for patterns extracted from collected articles.
const ARTICLE_INDICATOR_WEIGHT: f64 = 0.7;

/// Most indicators kept per article.
const MAX_INDICATORS: usize = 5;

/// (trigger substring, reported indicator). Checked against lowercased content.
const INDICATOR_TABLE: &[(&str, &str)] = &[
    ("gift card", "gift card payment demand"),
    ("arrest warrant", "fake arrest threats"),
    ("irs agent", "tax agency impersonation"),
    ("medicare representative", "medicare impersonation"),
    ("virus alert", "fake virus warnings"),
    ("immediate payment", "urgency tactics"),
    ("do not hang up", "psychological pressure"),
    ("verify ssn", "identity theft attempt"),
    ("bail money", "family emergency scam"),
    ("ai voice", "voice cloning"),
    ("deepfake", "deepfake technology"),
    ("wire transfer", "untraceable payment demand"),
];

/// Async feed results delivered to the collector webhook.
#[derive(Debug, Deserialize)]
pub struct FeedResultsPayload {
    #[serde(default)]
    pub snapshot_id: Option<String>,
    #[serde(default)]
    pub data: Vec<FeedResult>,
}

#[derive(Debug, Deserialize)]
pub struct FeedResult {
    #[serde(default)]
    pub input: FeedResultInput,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedResultInput {
    #[serde(default)]
    pub prompt: String,
}

/// Extract indicator phrases from raw article content. Bounded to the top 5.
pub fn indicators_from_content(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    INDICATOR_TABLE
        .iter()
        .filter(|(trigger, _)| lower.contains(trigger))
        .map(|(_, indicator)| indicator.to_string())
        .take(MAX_INDICATORS)
        .collect()
}

/// Classify scam type and urgency from the query prompt that produced a
/// feed result.
pub fn classify_prompt(prompt: &str) -> (ScamType, UrgencyLevel) {
    let lower = prompt.to_lowercase();
    if lower.contains("irs") || lower.contains("impersonation") {
        (ScamType::GovernmentImpersonation, UrgencyLevel::Critical)
    } else if lower.contains("grandparent") || lower.contains("family emergency") {
        (ScamType::GrandparentScam, UrgencyLevel::High)
    } else if lower.contains("romance") {
        (ScamType::RomanceScam, UrgencyLevel::High)
    } else if lower.contains("tech support") {
        (ScamType::TechSupport, UrgencyLevel::Medium)
    } else if lower.contains("medicare") {
        (ScamType::MedicareFraud, UrgencyLevel::High)
    } else {
        (ScamType::GeneralFraud, UrgencyLevel::Medium)
    }
}

/// Convert async feed results into articles. Entries whose content is too
/// short to analyze are skipped.
pub fn articles_from_results(payload: &FeedResultsPayload, received_at: &str) -> Vec<NewsArticle> {
    payload
        .data
        .iter()
        .filter(|r| r.content.len() > 50)
        .map(|r| {
            let (scam_type, urgency) = classify_prompt(&r.input.prompt);
            let title: String = r.input.prompt.chars().take(60).collect();
            let description: String = r.content.chars().take(500).collect();
            NewsArticle {
                title: format!("Feed digest: {}", title),
                description,
                url: payload
                    .snapshot_id
                    .as_deref()
                    .map(|id| format!("snapshot://{}", id))
                    .unwrap_or_else(|| "snapshot://unknown".to_string()),
                published: received_at.to_string(),
                source: "feed_webhook".to_string(),
                scam_type,
                urgency,
                elderly_specific: true,
                key_indicators: indicators_from_content(&r.content),
            }
        })
        .collect()
}

/// Deduplicate by lowercased title (first occurrence wins), newest first.
pub fn dedup_articles(mut articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    articles.sort_by(|a, b| b.published.cmp(&a.published));
    let mut seen = std::collections::HashSet::new();
    articles.retain(|a| {
        let key = a.title.to_lowercase();
        !key.is_empty() && seen.insert(key)
    });
    articles
}

/// Convert elderly-specific articles into indexable patterns, one per
/// indicator phrase.
pub fn patterns_from_articles(
    articles: &[NewsArticle],
    source: PatternSource,
) -> Vec<ScamPattern> {
    articles
        .iter()
        .filter(|a| a.elderly_specific)
        .flat_map(|a| {
            a.key_indicators.iter().map(move |indicator| ScamPattern {
                text: indicator.clone(),
                weight: ARTICLE_INDICATOR_WEIGHT,
                scam_type: a.scam_type,
                urgency: a.urgency,
                source,
                elderly_specific: true,
                article_id: Some(a.url.clone()),
                region: None,
            })
        })
        .collect()
}

/// Bucket article indicators by elderly-vulnerability category.
pub fn elderly_insights(articles: &[NewsArticle]) -> ElderlyInsights {
    let mut insights = ElderlyInsights::default();
    for article in articles {
        for indicator in &article.key_indicators {
            let lower = indicator.to_lowercase();
            if lower.contains("medicare") || lower.contains("social security") {
                insights.high_risk_phrases.push(indicator.clone());
            } else if lower.contains("grandchild") || lower.contains("family") {
                insights.emotional_triggers.push(indicator.clone());
            } else if lower.contains("urgent") || lower.contains("urgency") || lower.contains("immediate") {
                insights.urgency_tactics.push(indicator.clone());
            } else if lower.contains("impersonation") || lower.contains("official") {
                insights.impersonation_types.push(indicator.clone());
            }
        }
    }
    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, published: &str, indicators: &[&str]) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: String::new(),
            url: "https://example.com/a".to_string(),
            published: published.to_string(),
            source: "test".to_string(),
            scam_type: ScamType::GeneralFraud,
            urgency: UrgencyLevel::Medium,
            elderly_specific: true,
            key_indicators: indicators.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn indicators_are_extracted_and_bounded() {
        let content = "Scammers demand a gift card, threaten an arrest warrant, \
                       say do not hang up, ask to verify ssn, want bail money, \
                       use ai voice and deepfake tools with immediate payment.";
        let indicators = indicators_from_content(content);
        assert_eq!(indicators.len(), 5);
        assert_eq!(indicators[0], "gift card payment demand");
    }

    #[test]
    fn prompt_classification_picks_critical_for_impersonation() {
        let (scam_type, urgency) = classify_prompt("Latest IRS impersonation warnings");
        assert_eq!(scam_type, ScamType::GovernmentImpersonation);
        assert_eq!(urgency, UrgencyLevel::Critical);
    }

    #[test]
    fn short_results_are_skipped() {
        let payload = FeedResultsPayload {
            snapshot_id: Some("snap_1".to_string()),
            data: vec![
                FeedResult {
                    input: FeedResultInput {
                        prompt: "medicare fraud alerts".to_string(),
                    },
                    content: "too short".to_string(),
                },
                FeedResult {
                    input: FeedResultInput {
                        prompt: "grandparent scams family emergency fraud".to_string(),
                    },
                    content: "Criminals claim a grandchild needs bail money and demand \
                              secrecy from the victim."
                        .to_string(),
                },
            ],
        };
        let articles = articles_from_results(&payload, "2025-08-01T00:00:00Z");
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].scam_type, ScamType::GrandparentScam);
        assert_eq!(articles[0].url, "snapshot://snap_1");
        assert!(articles[0]
            .key_indicators
            .contains(&"family emergency scam".to_string()));
    }

    #[test]
    fn dedup_keeps_newest_first_occurrence() {
        let articles = vec![
            article("Same Title", "2025-08-01T00:00:00Z", &[]),
            article("same title", "2025-08-02T00:00:00Z", &[]),
            article("Other", "2025-07-30T00:00:00Z", &[]),
        ];
        let deduped = dedup_articles(articles);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].published, "2025-08-02T00:00:00Z");
    }

    #[test]
    fn only_elderly_specific_articles_produce_patterns() {
        let mut generic = article("Generic", "2025-08-01T00:00:00Z", &["gift card demand"]);
        generic.elderly_specific = false;
        let specific = article("Specific", "2025-08-01T00:00:00Z", &["bail money demand"]);

        let patterns = patterns_from_articles(&[generic, specific], PatternSource::Article);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].text, "bail money demand");
        assert_eq!(patterns[0].source, PatternSource::Article);
    }

    #[test]
    fn insights_bucket_by_category() {
        let a = article(
            "A",
            "2025-08-01T00:00:00Z",
            &[
                "medicare impersonation",
                "family emergency scam",
                "urgency tactics",
            ],
        );
        let insights = elderly_insights(&[a]);
        assert_eq!(insights.high_risk_phrases.len(), 1);
        assert_eq!(insights.emotional_triggers.len(), 1);
        assert_eq!(insights.urgency_tactics.len(), 1);
        assert!(insights.impersonation_types.is_empty());
    }
}
