//! Alerting outbound port. Notify the family contact (e.g. via SMS).

use crate::domain::DomainError;

/// Port for delivering alerts to the configured family contact.
///
/// Implemented by adapters (e.g. an SMS gateway). When not configured, the
/// screening service logs the alert text instead of sending it.
#[async_trait::async_trait]
pub trait AlertPort: Send + Sync {
    /// Send a single alert message.
    ///
    /// # Errors
    /// Returns `DomainError::Alert` if delivery fails.
    async fn send(&self, message: &str) -> Result<(), DomainError>;
}
