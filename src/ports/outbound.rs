//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    CallRecord, DomainError, NewsArticle, RiskAssessment, ScamPattern, TranscriptInsights,
    TranscriptSegment, TransferContext, TransferTarget,
};

/// Call-platform gateway. Answer, transcribe, transfer, block, monitor.
///
/// The platform drives the call itself; this port only issues control
/// actions and reads call state. Simulated when no platform is configured.
#[async_trait::async_trait]
pub trait CallGatewayPort: Send + Sync {
    /// Answer an incoming call and register it. Returns the call record with
    /// the greeting already played.
    async fn answer(
        &self,
        call_id: Option<String>,
        caller_number: &str,
    ) -> Result<CallRecord, DomainError>;

    /// Transcribe the next `window_secs` seconds of the call.
    async fn transcribe_segment(
        &self,
        call_id: &str,
        window_secs: u32,
    ) -> Result<TranscriptSegment, DomainError>;

    /// Warm transfer with context handoff. `Contact` routes to the family
    /// contact, `Senior` to the protected line.
    async fn warm_transfer(
        &self,
        call_id: &str,
        target: TransferTarget,
        context: &TransferContext,
    ) -> Result<(), DomainError>;

    /// Block the call and play the fraud warning message.
    async fn block(&self, call_id: &str, reason: &str) -> Result<(), DomainError>;

    /// Keep listening to a transferred call for suspicious activity.
    async fn monitor(&self, call_id: &str) -> Result<(), DomainError>;

    /// Look up a call by id. `None` when unknown.
    async fn get_call(&self, call_id: &str) -> Result<Option<CallRecord>, DomainError>;
}

/// A batch of articles returned by one feed collection.
#[derive(Debug, Clone)]
pub struct FeedBatch {
    pub source: String,
    pub articles: Vec<NewsArticle>,
    /// Set when the feed was triggered asynchronously and results will
    /// arrive later at the collector webhook.
    pub snapshot_id: Option<String>,
}

/// News feed. Collects recent elderly-scam articles.
#[async_trait::async_trait]
pub trait NewsFeedPort: Send + Sync {
    /// Feed name used in logs, snapshots, and collection state.
    fn source_name(&self) -> &str;

    /// Collect the latest articles from this feed.
    async fn collect(&self) -> Result<FeedBatch, DomainError>;
}

/// Transcript enhancement. Normalizes a raw transcript into insights and
/// produces post-call summaries.
#[async_trait::async_trait]
pub trait EnhancerPort: Send + Sync {
    async fn enhance(&self, transcript: &str) -> Result<TranscriptInsights, DomainError>;

    /// Human-readable summary of a screened call for the family report.
    async fn summarize(
        &self,
        call: &CallRecord,
        assessment: &RiskAssessment,
    ) -> Result<String, DomainError>;
}

/// Pattern store. Persist the index documents between runs.
#[async_trait::async_trait]
pub trait PatternStorePort: Send + Sync {
    /// Load persisted patterns. Empty when no store exists yet.
    async fn load(&self) -> Result<Vec<ScamPattern>, DomainError>;

    /// Replace the persisted pattern set.
    async fn save(&self, patterns: &[ScamPattern]) -> Result<(), DomainError>;
}

/// Call log. Append screened calls for audit.
#[async_trait::async_trait]
pub trait CallLogPort: Send + Sync {
    async fn append(&self, record: &CallRecord) -> Result<(), DomainError>;
}

/// Collection state. Track last collection time per feed source.
#[async_trait::async_trait]
pub trait CollectionStatePort: Send + Sync {
    /// Unix timestamp of the last collection for `source`. 0 if never.
    async fn last_collected(&self, source: &str) -> Result<i64, DomainError>;

    /// Update last collection time after a successful collection.
    async fn set_last_collected(&self, source: &str, timestamp: i64) -> Result<(), DomainError>;
}
