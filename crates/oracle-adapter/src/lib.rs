//! # Feels Oracle Adapter
//!
//! Exposes the pull-style historical oracle surface an AMM pool consumer
//! expects (`slot0`, `observations`, `observe`,
//! `increaseObservationCardinalityNext`) on top of push-style
//! mantissa/exponent price feeds. It provides:
//!
//! - Feed ingestion with a staleness guard
//! - Fixed-point normalization and dual-feed cross pricing
//! - Bounded-error price to tick conversion
//! - A synthetic, storage-free observation ring
//!
//! Every query re-reads the feed and the clock; nothing is cached between calls.

pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod feed;
pub mod math;
pub mod oracle;

// Re-export commonly used items
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DualFeedConfig, MarketAdjustment, SingleFeedConfig};
pub use constants::*;
pub use errors::{AdapterError, AdapterResult};
pub use feed::{FeedId, InMemoryFeed, PriceFeed, PriceSample, SnapshotFileFeed, StalenessPolicy};
pub use oracle::{
    ConfiguredAdapter, DualFeedAdapter, Observation, ObserveResult, PriceOracleAdapter,
    SingleFeedAdapter, Slot0,
};
