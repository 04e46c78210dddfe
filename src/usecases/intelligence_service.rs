//! Knowledge pipeline: seed ingestion, feed collection, index maintenance.
//!
//! Coordinates seed data, feed collectors, the in-memory pattern index, and
//! the persisted pattern store. Feed failures degrade gracefully: a failing
//! source is logged and skipped, the rest of the collection continues.

use crate::adapters::intel::extract::{
    articles_from_results, dedup_articles, elderly_insights, patterns_from_articles,
    FeedResultsPayload,
};
use crate::adapters::persistence::seed_data::{patterns_from_phrases, SeedData};
use crate::domain::{DomainError, IndexStats, NewsArticle, PatternIndex, PatternSource};
use crate::ports::{CollectionStatePort, NewsFeedPort, PatternStorePort};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Outcome of one collection run.
#[derive(Debug, Default)]
pub struct RefreshStats {
    pub sources_collected: usize,
    pub articles: usize,
    pub new_patterns: usize,
    /// Snapshot ids of async triggers whose results arrive via webhook.
    pub triggered: Vec<String>,
}

/// Intelligence service. Owns the pattern index lifecycle.
pub struct IntelligenceService {
    feeds: Vec<Arc<dyn NewsFeedPort>>,
    store: Arc<dyn PatternStorePort>,
    state: Arc<dyn CollectionStatePort>,
    index: Arc<RwLock<PatternIndex>>,
    seed: SeedData,
    snapshots_dir: PathBuf,
}

impl IntelligenceService {
    pub fn new(
        feeds: Vec<Arc<dyn NewsFeedPort>>,
        store: Arc<dyn PatternStorePort>,
        state: Arc<dyn CollectionStatePort>,
        index: Arc<RwLock<PatternIndex>>,
        seed: SeedData,
        snapshots_dir: PathBuf,
    ) -> Self {
        Self {
            feeds,
            store,
            state,
            index,
            seed,
            snapshots_dir,
        }
    }

    /// Build the index from seed data (phrases + curated articles) and
    /// persist it. Replaces any previous index content.
    ///
    /// Returns the number of indexed patterns.
    pub async fn initialize(&self) -> Result<usize, DomainError> {
        let phrases = self.seed.load_phrases().await?;
        let articles = self.seed.load_articles().await?;

        if !SeedData::validate(&phrases, &articles) {
            return Err(DomainError::Repo(
                "seed data validation failed: no scam phrases loaded".to_string(),
            ));
        }

        let mut patterns = patterns_from_phrases(&phrases);
        patterns.extend(patterns_from_articles(&articles, PatternSource::Article));

        let insights = elderly_insights(&articles);
        info!(
            high_risk = insights.high_risk_phrases.len(),
            emotional = insights.emotional_triggers.len(),
            urgency = insights.urgency_tactics.len(),
            "elderly-specific insights extracted from seed articles"
        );

        let count = patterns.len();
        {
            let mut index = self.index.write().await;
            *index = PatternIndex::from_patterns(patterns);
        }
        self.persist_index().await?;

        info!(count, "knowledge pipeline initialized");
        Ok(count)
    }

    /// Collect from all feeds, extract patterns, and grow the index.
    pub async fn refresh(&self) -> Result<RefreshStats, DomainError> {
        let mut stats = RefreshStats::default();
        let mut collected: Vec<NewsArticle> = Vec::new();
        let now = chrono::Utc::now().timestamp();

        for feed in &self.feeds {
            let source = feed.source_name().to_string();
            match feed.collect().await {
                Ok(batch) => {
                    if let Some(snapshot_id) = batch.snapshot_id {
                        info!(source = %source, snapshot_id = %snapshot_id, "collection triggered; results arrive via webhook");
                        stats.triggered.push(snapshot_id);
                    }
                    collected.extend(batch.articles);
                    stats.sources_collected += 1;
                    self.state.set_last_collected(&source, now).await?;
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "feed collection failed; skipping source");
                }
            }
        }

        let articles = dedup_articles(collected);
        stats.articles = articles.len();

        if !articles.is_empty() {
            self.save_snapshot("scam_news", &articles).await?;
            let new_patterns = patterns_from_articles(&articles, PatternSource::Article);
            stats.new_patterns = new_patterns.len();
            self.index.write().await.extend(new_patterns);
            self.persist_index().await?;
        }

        info!(
            sources = stats.sources_collected,
            articles = stats.articles,
            new_patterns = stats.new_patterns,
            "intelligence refresh complete"
        );
        Ok(stats)
    }

    /// Process async feed results delivered to the collector webhook.
    ///
    /// Returns the number of articles processed.
    pub async fn process_feed_results(
        &self,
        payload: FeedResultsPayload,
    ) -> Result<usize, DomainError> {
        let received_at = chrono::Utc::now().to_rfc3339();
        let articles = dedup_articles(articles_from_results(&payload, &received_at));

        if articles.is_empty() {
            info!(snapshot_id = ?payload.snapshot_id, "feed results contained no usable articles");
            return Ok(0);
        }

        self.save_snapshot("feed_results", &articles).await?;

        let new_patterns = patterns_from_articles(&articles, PatternSource::FeedWebhook);
        let added = new_patterns.len();
        self.index.write().await.extend(new_patterns);
        self.persist_index().await?;

        info!(
            snapshot_id = ?payload.snapshot_id,
            articles = articles.len(),
            patterns = added,
            "processed webhook feed results"
        );
        Ok(articles.len())
    }

    /// Index composition for reporting.
    pub async fn stats(&self) -> IndexStats {
        self.index.read().await.stats()
    }

    async fn persist_index(&self) -> Result<(), DomainError> {
        let patterns = {
            let index = self.index.read().await;
            index.patterns().to_vec()
        };
        self.store.save(&patterns).await
    }

    /// Persist a dated JSON snapshot of collected articles.
    async fn save_snapshot(
        &self,
        prefix: &str,
        articles: &[NewsArticle],
    ) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.snapshots_dir)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let path = self.snapshots_dir.join(format!("{}_{}.json", prefix, stamp));
        let body = serde_json::json!({
            "collection_date": chrono::Utc::now().to_rfc3339(),
            "articles": articles,
        });
        let json = serde_json::to_string_pretty(&body)
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        info!(path = %path.display(), count = articles.len(), "snapshot saved");
        Ok(())
    }
}
