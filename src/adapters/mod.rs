//! Infrastructure adapters. Implement outbound ports.
//!
//! Call platform, feeds, enhancer, persistence, HTTP, alerts, UI.
//! Map infrastructure errors to DomainError.

pub mod enhancement;
pub mod http;
pub mod intel;
pub mod notify;
pub mod persistence;
pub mod telephony;
pub mod ui;
