//! Application use cases. Orchestrate domain logic via ports.

pub mod intelligence_service;
pub mod report_service;
pub mod screening_service;

pub use intelligence_service::{IntelligenceService, RefreshStats};
pub use report_service::ReportService;
pub use screening_service::{AlertOutcome, ScreeningOutcome, ScreeningService};
