//! In-process feed that holds the latest pushed sample per feed id.

use std::collections::HashMap;
use std::sync::RwLock;

use log::debug;

use super::{FeedId, PriceFeed, PriceSample};
use crate::errors::{AdapterError, AdapterResult};

/// Thread-safe map of the most recent sample for each feed
#[derive(Debug, Default)]
pub struct InMemoryFeed {
    samples: RwLock<HashMap<FeedId, PriceSample>>,
}

impl InMemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feed pre-populated with samples
    pub fn with_samples(samples: impl IntoIterator<Item = (FeedId, PriceSample)>) -> Self {
        Self {
            samples: RwLock::new(samples.into_iter().collect()),
        }
    }

    /// Publish a sample, replacing whatever the feed held before
    pub fn push(&self, feed: FeedId, sample: PriceSample) {
        debug!(
            "Feed {} pushed mantissa={} exponent={} publish_time={}",
            feed, sample.mantissa, sample.exponent, sample.publish_time
        );
        // A poisoned lock still holds a consistent map: writes are single inserts
        let mut samples = match self.samples.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        samples.insert(feed, sample);
    }

    /// Remove a feed so that subsequent reads fail
    pub fn remove(&self, feed: &FeedId) -> Option<PriceSample> {
        let mut samples = match self.samples.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        samples.remove(feed)
    }
}

impl PriceFeed for InMemoryFeed {
    fn latest_price(&self, feed: &FeedId) -> AdapterResult<PriceSample> {
        let samples = self
            .samples
            .read()
            .map_err(|_| AdapterError::FeedUnavailable("feed lock poisoned".to_string()))?;
        samples
            .get(feed)
            .copied()
            .ok_or(AdapterError::FeedNotFound(*feed))
    }
}
