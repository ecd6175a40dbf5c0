//! One-shot queries against a configured adapter, rendered as JSON
//!
//! Rendered straight to text: Q64.64 prices exceed what `serde_json::Value`
//! can hold as an integer.

use feels_oracle_adapter::math::sqrt_price_at_tick;
use feels_oracle_adapter::oracle::twap::consult;
use feels_oracle_adapter::PriceOracleAdapter;
use serde::Serialize;

use crate::error::CliResult;

/// Consumer-side TWAP over a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TwapReport {
    pub window: u32,
    pub mean_tick: i32,
    pub sqrt_price_x64: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Slot0,
    Observation { index: u16 },
    Observe { ages: Vec<u32> },
    Twap { window: u32 },
}

impl Query {
    pub fn run<A: PriceOracleAdapter + ?Sized>(&self, adapter: &A) -> CliResult<String> {
        let rendered = match self {
            Query::Slot0 => serde_json::to_string_pretty(&adapter.snapshot()?)?,
            Query::Observation { index } => {
                serde_json::to_string_pretty(&adapter.observation_at(*index)?)?
            }
            Query::Observe { ages } => {
                serde_json::to_string_pretty(&adapter.observe_ages(ages)?)?
            }
            Query::Twap { window } => serde_json::to_string_pretty(&twap(adapter, *window)?)?,
        };
        Ok(rendered)
    }
}

/// Mean tick and its sqrt price, both from a single `observe` call
pub fn twap<A: PriceOracleAdapter + ?Sized>(adapter: &A, window: u32) -> CliResult<TwapReport> {
    let mean_tick = consult(adapter, window)?;
    let sqrt_price_x64 = sqrt_price_at_tick(mean_tick)?;
    Ok(TwapReport {
        window,
        mean_tick,
        sqrt_price_x64,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use feels_oracle_adapter::{
        AdapterResult, FeedId, FixedClock, InMemoryFeed, MarketAdjustment, PriceFeed,
        PriceSample, SingleFeedAdapter, SingleFeedConfig, StalenessPolicy, Q64,
    };
    use serde_json::Value;

    use super::*;

    const FEED: FeedId = FeedId::new([8; 32]);
    const NOW: i64 = 1_700_000_000;

    fn adapter(mantissa: i64) -> SingleFeedAdapter<InMemoryFeed, FixedClock> {
        let feed = InMemoryFeed::with_samples([(FEED, PriceSample::new(mantissa, 0, NOW))]);
        let config =
            SingleFeedConfig::new(FEED, StalenessPolicy::new(60), MarketAdjustment::default());
        SingleFeedAdapter::new(feed, FixedClock::new(NOW), config).unwrap()
    }

    #[test]
    fn test_slot0_json() {
        let rendered = Query::Slot0.run(&adapter(1)).unwrap();
        assert!(rendered.contains("\"sqrt_price_x64\": 18446744073709551616"));
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["tick"], 0);
        assert_eq!(value["observation_index"], 65_534);
        assert_eq!(value["unlocked"], true);
    }

    #[test]
    fn test_observe_json() {
        let rendered = Query::Observe { ages: vec![60, 0] }.run(&adapter(1)).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["tick_cumulatives"].as_array().unwrap().len(), 2);
        assert_eq!(
            value["seconds_per_liquidity_cumulative_x128s"].as_array().unwrap().len(),
            2
        );
    }

    #[test]
    fn test_twap_matches_spot() {
        let adapter = adapter(1);
        let report = twap(&adapter, 1_800).unwrap();
        assert_eq!(report.mean_tick, 0);
        assert_eq!(report.sqrt_price_x64, Q64);
    }

    /// Publishes a doubled price on every read
    struct DoublingFeed {
        reads: AtomicI64,
    }

    impl PriceFeed for DoublingFeed {
        fn latest_price(&self, _feed: &FeedId) -> AdapterResult<PriceSample> {
            let read = self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(PriceSample::new(1 << read, 0, NOW))
        }
    }

    #[test]
    fn test_twap_reads_feed_once() {
        let feed = DoublingFeed {
            reads: AtomicI64::new(0),
        };
        let config =
            SingleFeedConfig::new(FEED, StalenessPolicy::new(60), MarketAdjustment::default());
        let adapter = SingleFeedAdapter::new(&feed, FixedClock::new(NOW), config).unwrap();

        let report = twap(&adapter, 600).unwrap();
        assert_eq!(feed.reads.load(Ordering::SeqCst), 1);
        assert_eq!(report.mean_tick, 0);
        assert_eq!(report.sqrt_price_x64, sqrt_price_at_tick(report.mean_tick).unwrap());
        assert_eq!(report.sqrt_price_x64, Q64);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(Query::Slot0.run(&adapter(0)).is_err());
        assert!(Query::Observation { index: u16::MAX }.run(&adapter(1)).is_err());
    }
}
