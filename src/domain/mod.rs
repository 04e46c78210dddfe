//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod patterns;
pub mod risk;

pub use entities::{
    CallRecord, CallStatus, ElderlyInsights, Incident, NewsArticle, PatternMatch, PatternSource,
    Recommendation, RiskAssessment, ScamPattern, ScamType, ScreeningDecision, Sentiment, Speaker,
    TranscriptInsights, TranscriptSegment, TransferContext, TransferTarget, UrgencyLevel,
};
pub use errors::DomainError;
pub use patterns::{IndexStats, PatternIndex};
