//! Persistence adapters: pattern store, call log, collection state, seeds.

pub mod call_log;
pub mod pattern_store;
pub mod seed_data;
pub mod state_json;

pub use call_log::CallLog;
pub use pattern_store::PatternStore;
pub use seed_data::SeedData;
pub use state_json::StateJson;
