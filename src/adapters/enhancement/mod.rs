//! Transcript enhancement adapters. Implement EnhancerPort.
//!
//! Provides an OpenAI-compatible adapter and a heuristic fallback.

pub mod context;
pub mod heuristic_adapter;
pub mod llm_adapter;

pub use context::segments_to_csv;
pub use heuristic_adapter::HeuristicEnhancer;
pub use llm_adapter::LlmEnhancer;
