//! Single-feed adapter
//!
//! One feed quoting the target market directly, or its reciprocal when the
//! adjustment asks for inversion.

use log::debug;

use super::PriceOracleAdapter;
use crate::clock::Clock;
use crate::config::SingleFeedConfig;
use crate::errors::AdapterResult;
use crate::feed::{fetch_validated, PriceFeed};
use crate::math::{ensure_tick_in_range, normalize, orient_tick, ratio_to_tick};

#[derive(Debug)]
pub struct SingleFeedAdapter<F, C> {
    feed: F,
    clock: C,
    config: SingleFeedConfig,
}

impl<F: PriceFeed, C: Clock> SingleFeedAdapter<F, C> {
    pub fn new(feed: F, clock: C, config: SingleFeedConfig) -> AdapterResult<Self> {
        config.validate()?;
        Ok(Self { feed, clock, config })
    }
}

impl<F: PriceFeed, C: Clock> PriceOracleAdapter for SingleFeedAdapter<F, C> {
    fn now(&self) -> i64 {
        self.clock.unix_timestamp()
    }

    fn tick_at(&self, now: i64) -> AdapterResult<i32> {
        let config = &self.config;
        let sample = fetch_validated(&self.feed, &config.feed_id, &config.staleness, now)?;
        let ratio = normalize(&config.feed_id, &sample, config.adjustment.decimal_difference)?;
        let raw_tick = ratio_to_tick(ratio, config.precision_bits)?;

        // Range is checked on the final orientation
        let tick = ensure_tick_in_range(orient_tick(raw_tick, config.adjustment.invert))?;
        debug!("Feed {} at {}: tick {}", config.feed_id, now, tick);
        Ok(tick)
    }
}
