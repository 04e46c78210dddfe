//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Call gateway error: {0}")]
    CallGateway(String),

    #[error("Call not found: {0}")]
    CallNotFound(String),

    #[error("News feed error: {0}")]
    Feed(String),

    #[error("Repository error: {0}")]
    Repo(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Transcript enhancement failed: {0}")]
    Enhancer(String),

    #[error("Alert delivery failed: {0}")]
    Alert(String),

    #[error("Server error: {0}")]
    Server(String),
}
