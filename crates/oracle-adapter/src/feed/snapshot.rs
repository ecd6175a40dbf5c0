//! File-backed feed reading Hermes-style price update documents.
//!
//! The document is re-read on every fetch, so an external process can keep
//! pushing updates into the file while the adapter keeps pulling from it.
//!
//! ```json
//! {
//!   "parsed": [
//!     {
//!       "id": "ef0d8b6fda2ceba41da15d4095d1da392a0d2f8ed0c6c7bc0f4cfac8c280b56d",
//!       "price": {
//!         "price": "6140993501",
//!         "conf": "3025000",
//!         "expo": -8,
//!         "publish_time": 1700000000
//!       }
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{FeedId, PriceFeed, PriceSample};
use crate::errors::{AdapterError, AdapterResult};

/// Top-level price update document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdateDocument {
    pub parsed: Vec<ParsedPriceUpdate>,
}

/// One feed entry in a price update document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedPriceUpdate {
    pub id: FeedId,
    pub price: WirePrice,
}

/// Price as published on the wire; integers wider than JSON numbers are strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePrice {
    pub price: String,
    #[serde(default)]
    pub conf: String,
    pub expo: i32,
    pub publish_time: i64,
}

impl WirePrice {
    pub fn to_sample(&self) -> AdapterResult<PriceSample> {
        let mantissa = self.price.trim().parse::<i64>().map_err(|e| {
            AdapterError::FeedUnavailable(format!("price {:?}: {e}", self.price))
        })?;
        Ok(PriceSample::new(mantissa, self.expo, self.publish_time))
    }
}

impl PriceUpdateDocument {
    pub fn parse(content: &str) -> AdapterResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Sample for `feed`; the last entry wins if the id appears more than once
    pub fn sample(&self, feed: &FeedId) -> AdapterResult<PriceSample> {
        self.parsed
            .iter()
            .rev()
            .find(|entry| entry.id == *feed)
            .ok_or(AdapterError::FeedNotFound(*feed))?
            .price
            .to_sample()
    }
}

/// Feed backed by a price update document on disk
#[derive(Debug, Clone)]
pub struct SnapshotFileFeed {
    path: PathBuf,
}

impl SnapshotFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AdapterResult<PriceUpdateDocument> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AdapterError::FeedUnavailable(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))
        })?;
        PriceUpdateDocument::parse(&content)
    }
}

impl PriceFeed for SnapshotFileFeed {
    fn latest_price(&self, feed: &FeedId) -> AdapterResult<PriceSample> {
        let sample = self.load()?.sample(feed)?;
        debug!(
            "Read feed {} from {}: mantissa={} exponent={} publish_time={}",
            feed,
            self.path.display(),
            sample.mantissa,
            sample.exponent,
            sample.publish_time
        );
        Ok(sample)
    }
}
