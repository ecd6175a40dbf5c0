//! Dual-feed adapter
//!
//! Prices a market with no direct feed from two feeds sharing a quote asset
//! (e.g. ETH/USD over BTC/USD for ETH/BTC). Each feed passes ingestion on
//! its own before the cross ratio is formed.

use log::debug;

use super::PriceOracleAdapter;
use crate::clock::Clock;
use crate::config::DualFeedConfig;
use crate::errors::AdapterResult;
use crate::feed::{fetch_validated, PriceFeed};
use crate::math::{combine, ensure_tick_in_range, ratio_to_tick};

#[derive(Debug)]
pub struct DualFeedAdapter<F, C> {
    feed: F,
    clock: C,
    config: DualFeedConfig,
}

impl<F: PriceFeed, C: Clock> DualFeedAdapter<F, C> {
    pub fn new(feed: F, clock: C, config: DualFeedConfig) -> AdapterResult<Self> {
        config.validate()?;
        Ok(Self { feed, clock, config })
    }
}

impl<F: PriceFeed, C: Clock> PriceOracleAdapter for DualFeedAdapter<F, C> {
    fn now(&self) -> i64 {
        self.clock.unix_timestamp()
    }

    fn tick_at(&self, now: i64) -> AdapterResult<i32> {
        let config = &self.config;
        let numerator = fetch_validated(&self.feed, &config.numerator, &config.staleness, now)?;
        let denominator = fetch_validated(&self.feed, &config.denominator, &config.staleness, now)?;

        let ratio = combine(
            (&config.numerator, &numerator),
            (&config.denominator, &denominator),
            config.decimal_difference,
        )?;
        let tick = ensure_tick_in_range(ratio_to_tick(ratio, config.precision_bits)?)?;
        debug!(
            "Feeds {} / {} at {}: tick {}",
            config.numerator, config.denominator, now, tick
        );
        Ok(tick)
    }
}
