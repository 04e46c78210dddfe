//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod alerting;
pub mod inbound;
pub mod outbound;

pub use alerting::AlertPort;
pub use inbound::InputPort;
pub use outbound::{
    CallGatewayPort, CallLogPort, CollectionStatePort, EnhancerPort, FeedBatch, NewsFeedPort,
    PatternStorePort,
};
