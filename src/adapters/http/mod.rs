//! HTTP adapter: the axum webhook server.

pub mod server;

pub use server::{serve, AppState, ScamAlertPayload};
