//! Seed data loading: curated scam phrases and articles shipped in data/.
//!
//! Missing files are logged and yield empty sets; the pipeline then relies
//! on collected intelligence alone.

use crate::domain::{DomainError, NewsArticle, PatternSource, ScamPattern, ScamType, UrgencyLevel};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// Weight for seed phrases: curated, known-scam wording.
const SEED_PHRASE_WEIGHT: f64 = 0.8;

/// Loads seed phrases and curated articles from the data directory.
pub struct SeedData {
    data_dir: PathBuf,
}

/// On-disk article format (data/scam_articles.json).
#[derive(Debug, Deserialize)]
struct ArticleFile {
    articles: Vec<SeedArticle>,
}

#[derive(Debug, Deserialize)]
struct SeedArticle {
    id: String,
    title: String,
    content: String,
    date: String,
    region: String,
    #[serde(default)]
    elderly_specific: bool,
    #[serde(default = "default_urgency")]
    urgency_level: UrgencyLevel,
    #[serde(default)]
    scam_indicators: Vec<String>,
}

fn default_urgency() -> UrgencyLevel {
    UrgencyLevel::Medium
}

impl SeedData {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Load scam phrases, one per line; blank lines skipped.
    pub async fn load_phrases(&self) -> Result<Vec<String>, DomainError> {
        let path = self.data_dir.join("scam_phrases.txt");
        let raw = match fs::read_to_string(&path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "scam phrases file not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(DomainError::Repo(e.to_string())),
        };
        let phrases: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        info!(count = phrases.len(), "loaded scam phrases");
        Ok(phrases)
    }

    /// Load curated articles. Each becomes a `NewsArticle` with its
    /// indicators; scam type is classified from the indicators.
    pub async fn load_articles(&self) -> Result<Vec<NewsArticle>, DomainError> {
        let path = self.data_dir.join("scam_articles.json");
        let raw = match fs::read_to_string(&path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "scam articles file not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(DomainError::Repo(e.to_string())),
        };
        let file: ArticleFile =
            serde_json::from_str(&raw).map_err(|e| DomainError::Repo(e.to_string()))?;

        let articles: Vec<NewsArticle> = file
            .articles
            .into_iter()
            .map(|a| NewsArticle {
                scam_type: ScamType::classify(&a.scam_indicators),
                title: a.title,
                description: a.content.chars().take(200).collect(),
                url: format!("seed://{}", a.id),
                published: a.date,
                source: format!("seed:{}", a.region),
                urgency: a.urgency_level,
                elderly_specific: a.elderly_specific,
                key_indicators: a.scam_indicators,
            })
            .collect();
        info!(count = articles.len(), "loaded curated articles");
        Ok(articles)
    }

    /// Validate loaded seed data. Warns when no phrases are present.
    pub fn validate(phrases: &[String], articles: &[NewsArticle]) -> bool {
        if phrases.is_empty() {
            warn!("no scam phrases loaded");
            return false;
        }
        if articles.is_empty() {
            warn!("no curated articles loaded");
        }
        true
    }
}

/// Convert seed phrases into indexable patterns.
pub fn patterns_from_phrases(phrases: &[String]) -> Vec<ScamPattern> {
    phrases
        .iter()
        .map(|p| ScamPattern {
            text: p.clone(),
            weight: SEED_PHRASE_WEIGHT,
            scam_type: ScamType::classify(std::slice::from_ref(p)),
            urgency: UrgencyLevel::High,
            source: PatternSource::SeedPhrase,
            elderly_specific: true,
            article_id: None,
            region: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_files_yield_empty_sets() {
        let dir = tempfile::tempdir().unwrap();
        let seed = SeedData::new(dir.path());
        assert!(seed.load_phrases().await.unwrap().is_empty());
        assert!(seed.load_articles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn phrases_skip_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("scam_phrases.txt"),
            "gift card\n\n  arrest warrant  \n",
        )
        .await
        .unwrap();

        let seed = SeedData::new(dir.path());
        let phrases = seed.load_phrases().await.unwrap();
        assert_eq!(phrases, vec!["gift card", "arrest warrant"]);
    }

    #[tokio::test]
    async fn articles_parse_and_classify() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::json!({
            "articles": [{
                "id": "a1",
                "title": "Medicare card scam",
                "content": "Fraudsters pose as Medicare reps.",
                "date": "2025-07-01",
                "region": "north america",
                "elderly_specific": true,
                "urgency_level": "high",
                "scam_indicators": ["medicare representative", "verify benefits"]
            }]
        });
        tokio::fs::write(
            dir.path().join("scam_articles.json"),
            serde_json::to_string(&json).unwrap(),
        )
        .await
        .unwrap();

        let seed = SeedData::new(dir.path());
        let articles = seed.load_articles().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].scam_type, ScamType::MedicareFraud);
        assert_eq!(articles[0].urgency, UrgencyLevel::High);
    }

    #[test]
    fn phrase_patterns_use_seed_weight() {
        let patterns = patterns_from_phrases(&["bail money".to_string()]);
        assert_eq!(patterns.len(), 1);
        assert!((patterns[0].weight - SEED_PHRASE_WEIGHT).abs() < 1e-9);
        assert_eq!(patterns[0].source, PatternSource::SeedPhrase);
    }
}
