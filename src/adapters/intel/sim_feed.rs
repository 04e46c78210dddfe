//! Simulated feed for development and testing without API keys.
//!
//! Returns fixture articles dated "today" so the rest of the pipeline
//! behaves exactly as with a live feed.

use crate::domain::{DomainError, NewsArticle, ScamType, UrgencyLevel};
use crate::ports::{FeedBatch, NewsFeedPort};
use tracing::info;

const SOURCE_NAME: &str = "simulated";

/// Simulated news feed.
pub struct SimFeed;

impl SimFeed {
    pub fn new() -> Self {
        Self
    }

    fn fixture_articles() -> Vec<NewsArticle> {
        let today = chrono::Utc::now().format("%Y-%m-%d");
        vec![
            NewsArticle {
                title: "New IRS Impersonation Scam Targets Elderly with AI Voice Cloning"
                    .to_string(),
                description: "Scammers clone the voices of tax agents and threaten elderly \
                              taxpayers with arrest unless an immediate payment is made by \
                              gift card or wire transfer."
                    .to_string(),
                url: "https://example.com/irs-ai-scam".to_string(),
                published: format!("{}T10:00:00Z", today),
                source: SOURCE_NAME.to_string(),
                scam_type: ScamType::GovernmentImpersonation,
                urgency: UrgencyLevel::Critical,
                elderly_specific: true,
                key_indicators: vec![
                    "voice cloning".to_string(),
                    "tax agency impersonation".to_string(),
                    "fake arrest threats".to_string(),
                    "gift card payment demand".to_string(),
                ],
            },
            NewsArticle {
                title: "Medicare Open Enrollment Scams Surge This Season".to_string(),
                description: "Consumer protection agencies report a sharp rise in Medicare \
                              scams during open enrollment. Fraudsters pose as Medicare \
                              representatives to harvest personal information."
                    .to_string(),
                url: "https://example.com/medicare-scam-surge".to_string(),
                published: format!("{}T08:30:00Z", today),
                source: SOURCE_NAME.to_string(),
                scam_type: ScamType::MedicareFraud,
                urgency: UrgencyLevel::High,
                elderly_specific: true,
                key_indicators: vec![
                    "medicare impersonation".to_string(),
                    "personal info requests".to_string(),
                    "unsolicited calls".to_string(),
                ],
            },
            NewsArticle {
                title: "Grandparent Scam Evolution: Social Media Intel Makes Calls Convincing"
                    .to_string(),
                description: "Scammers harvest family details from social media so grandparent \
                              scams sound authentic, quoting real names before demanding bail \
                              money and secrecy."
                    .to_string(),
                url: "https://example.com/grandparent-social-media".to_string(),
                published: format!("{}T14:00:00Z", today),
                source: SOURCE_NAME.to_string(),
                scam_type: ScamType::GrandparentScam,
                urgency: UrgencyLevel::High,
                elderly_specific: true,
                key_indicators: vec![
                    "family emergency scam".to_string(),
                    "bail money demand".to_string(),
                    "secrecy demands".to_string(),
                ],
            },
            NewsArticle {
                title: "Tech Support Scams Target Seniors with Fake Virus Warnings".to_string(),
                description: "Computer users over 65 remain the primary targets of tech \
                              support scams that show fake virus alerts and demand remote \
                              access."
                    .to_string(),
                url: "https://example.com/tech-support-scam".to_string(),
                published: format!("{}T12:00:00Z", today),
                source: SOURCE_NAME.to_string(),
                scam_type: ScamType::TechSupport,
                urgency: UrgencyLevel::Medium,
                elderly_specific: true,
                key_indicators: vec![
                    "fake virus warnings".to_string(),
                    "remote access request".to_string(),
                ],
            },
            NewsArticle {
                title: "Consumer Alert: Romance Scams Cost Seniors Millions Last Year"
                    .to_string(),
                description: "Regulator data shows romance scams disproportionately affect \
                              older adults, with losses concentrated around wire transfers \
                              to overseas accounts."
                    .to_string(),
                url: "https://example.com/romance-scam-alert".to_string(),
                published: format!("{}T09:15:00Z", today),
                source: SOURCE_NAME.to_string(),
                scam_type: ScamType::RomanceScam,
                urgency: UrgencyLevel::High,
                elderly_specific: true,
                key_indicators: vec![
                    "online dating fraud".to_string(),
                    "untraceable payment demand".to_string(),
                ],
            },
        ]
    }
}

impl Default for SimFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NewsFeedPort for SimFeed {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    async fn collect(&self) -> Result<FeedBatch, DomainError> {
        let articles = Self::fixture_articles();
        info!(count = articles.len(), "[simulated] returning fixture articles");
        Ok(FeedBatch {
            source: SOURCE_NAME.to_string(),
            articles,
            snapshot_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::intel::extract::patterns_from_articles;
    use crate::domain::PatternSource;

    #[tokio::test]
    async fn fixtures_cover_major_scam_families() {
        let batch = SimFeed::new().collect().await.unwrap();
        assert_eq!(batch.articles.len(), 5);
        assert!(batch
            .articles
            .iter()
            .any(|a| a.scam_type == ScamType::GovernmentImpersonation));
        assert!(batch.articles.iter().all(|a| a.elderly_specific));
    }

    #[tokio::test]
    async fn fixtures_produce_indexable_patterns() {
        let batch = SimFeed::new().collect().await.unwrap();
        let patterns = patterns_from_articles(&batch.articles, PatternSource::Article);
        assert!(patterns.len() >= 10);
    }
}
