//! # Price Ingestion
//!
//! Push-style feed samples and the staleness guard applied to them before
//! they reach the math. Samples are fetched fresh on every query and are
//! never mutated after the read.

pub mod memory;
pub mod snapshot;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DEFAULT_MAX_AGE_SECONDS;
use crate::errors::{AdapterError, AdapterResult};

pub use memory::InMemoryFeed;
pub use snapshot::SnapshotFileFeed;

// ============================================================================
// Feed Identifier
// ============================================================================

/// 32-byte price feed identifier, displayed as `0x`-prefixed hex
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FeedId([u8; 32]);

impl FeedId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a hex identifier, with or without the `0x` prefix
    pub fn from_hex(value: &str) -> AdapterResult<Self> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
            AdapterError::InvalidConfig(format!("feed id {value:?}: {e}"))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedId({self})")
    }
}

impl FromStr for FeedId {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for FeedId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FeedId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Price Sample
// ============================================================================

/// A single feed reading: `price = mantissa * 10^exponent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSample {
    pub mantissa: i64,
    pub exponent: i32,
    /// Unix timestamp (seconds) at which the feed published this sample
    pub publish_time: i64,
}

impl PriceSample {
    pub fn new(mantissa: i64, exponent: i32, publish_time: i64) -> Self {
        Self {
            mantissa,
            exponent,
            publish_time,
        }
    }

    /// Age of the sample at `now`; a publish time in the future counts as zero
    pub fn age(&self, now: i64) -> u64 {
        u64::try_from(now.saturating_sub(self.publish_time)).unwrap_or(0)
    }

    /// The mantissa as an unsigned magnitude, rejecting zero and negative prices
    pub fn positive_mantissa(&self, feed: &FeedId) -> AdapterResult<u64> {
        if self.mantissa <= 0 {
            warn!(
                "Rejecting feed {}: non-positive mantissa {}",
                feed, self.mantissa
            );
            return Err(AdapterError::InvalidPrice {
                feed: *feed,
                mantissa: self.mantissa,
            });
        }
        Ok(self.mantissa.unsigned_abs())
    }
}

// ============================================================================
// Staleness Policy
// ============================================================================

/// Maximum tolerated age of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalenessPolicy {
    /// Seconds; a sample exactly this old is still accepted
    pub max_age: u64,
}

impl StalenessPolicy {
    pub fn new(max_age: u64) -> Self {
        Self { max_age }
    }

    /// Fail with `StaleFeed` when the sample is older than `max_age` at `now`
    pub fn check(&self, feed: &FeedId, sample: &PriceSample, now: i64) -> AdapterResult<()> {
        let age = sample.age(now);
        if age > self.max_age {
            warn!(
                "STALENESS VIOLATION: feed {} published at {}, age {}s > max {}s",
                feed, sample.publish_time, age, self.max_age
            );
            return Err(AdapterError::StaleFeed {
                feed: *feed,
                age,
                max_age: self.max_age,
            });
        }
        Ok(())
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE_SECONDS,
        }
    }
}

// ============================================================================
// Upstream Feed Interface
// ============================================================================

/// Upstream push-style price source
pub trait PriceFeed {
    /// Latest published sample, without any freshness check
    fn latest_price(&self, feed: &FeedId) -> AdapterResult<PriceSample>;

    /// Latest sample, failing with `StaleFeed` if it is older than the policy allows
    fn price_no_older_than(
        &self,
        feed: &FeedId,
        policy: &StalenessPolicy,
        now: i64,
    ) -> AdapterResult<PriceSample> {
        let sample = self.latest_price(feed)?;
        policy.check(feed, &sample, now)?;
        Ok(sample)
    }
}

impl<T: PriceFeed + ?Sized> PriceFeed for &T {
    fn latest_price(&self, feed: &FeedId) -> AdapterResult<PriceSample> {
        (**self).latest_price(feed)
    }

    fn price_no_older_than(
        &self,
        feed: &FeedId,
        policy: &StalenessPolicy,
        now: i64,
    ) -> AdapterResult<PriceSample> {
        (**self).price_no_older_than(feed, policy, now)
    }
}

impl<T: PriceFeed + ?Sized> PriceFeed for Arc<T> {
    fn latest_price(&self, feed: &FeedId) -> AdapterResult<PriceSample> {
        (**self).latest_price(feed)
    }

    fn price_no_older_than(
        &self,
        feed: &FeedId,
        policy: &StalenessPolicy,
        now: i64,
    ) -> AdapterResult<PriceSample> {
        (**self).price_no_older_than(feed, policy, now)
    }
}

/// Fetch one sample and run both ingestion checks: staleness, then sign
pub fn fetch_validated<F: PriceFeed + ?Sized>(
    source: &F,
    feed: &FeedId,
    policy: &StalenessPolicy,
    now: i64,
) -> AdapterResult<PriceSample> {
    let sample = source.price_no_older_than(feed, policy, now)?;
    sample.positive_mantissa(feed)?;
    Ok(sample)
}
