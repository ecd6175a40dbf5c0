//! # Oracle Adapter Surface
//!
//! The consumer-facing historical oracle interface and its two
//! implementations: a single feed, optionally inverted, and a cross price
//! derived from two feeds that share a quote asset.
//!
//! | Consumer call | Adapter operation |
//! |---|---|
//! | `slot0()` | [`PriceOracleAdapter::snapshot`] |
//! | `observations(i)` | [`PriceOracleAdapter::observation_at`] |
//! | `observe(ages)` | [`PriceOracleAdapter::observe_ages`] |
//! | `increaseObservationCardinalityNext(n)` | [`PriceOracleAdapter::bump_cardinality`] |

pub mod dual;
pub mod history;
pub mod single;
pub mod twap;

use crate::clock::Clock;
use crate::errors::AdapterResult;
use crate::feed::PriceFeed;

pub use dual::DualFeedAdapter;
pub use history::{Observation, ObserveResult, Slot0, SyntheticHistory};
pub use single::SingleFeedAdapter;

/// Pull-style oracle view over a push-style price source
///
/// Implementors only supply the clock reading and the tick derivation; every
/// query reads the clock once, derives the tick once from a fresh feed
/// sample, and answers from a [`SyntheticHistory`] built from the two.
pub trait PriceOracleAdapter {
    /// Call-time unix timestamp
    fn now(&self) -> i64;

    /// Fetch, validate, and convert the feed price into a tick at `now`
    fn tick_at(&self, now: i64) -> AdapterResult<i32>;

    fn current_tick(&self) -> AdapterResult<i32> {
        self.tick_at(self.now())
    }

    fn history(&self) -> AdapterResult<SyntheticHistory> {
        let now = self.now();
        let tick = self.tick_at(now)?;
        Ok(SyntheticHistory::new(tick, now))
    }

    /// `slot0()`
    fn snapshot(&self) -> AdapterResult<Slot0> {
        self.history()?.slot0()
    }

    /// `observations(index)`
    fn observation_at(&self, index: u16) -> AdapterResult<Observation> {
        self.history()?.observation(index)
    }

    /// `observe(secondsAgos)`
    fn observe_ages(&self, ages: &[u32]) -> AdapterResult<ObserveResult> {
        Ok(self.history()?.observe(ages))
    }

    /// `increaseObservationCardinalityNext(n)`: accepted and ignored, the ring
    /// is always reported full
    fn bump_cardinality(&self, _observation_cardinality_next: u16) {}
}

impl<T: PriceOracleAdapter + ?Sized> PriceOracleAdapter for &T {
    fn now(&self) -> i64 {
        (**self).now()
    }

    fn tick_at(&self, now: i64) -> AdapterResult<i32> {
        (**self).tick_at(now)
    }
}

/// Adapter mode chosen once at construction
#[derive(Debug)]
pub enum ConfiguredAdapter<F, C> {
    Single(SingleFeedAdapter<F, C>),
    Dual(DualFeedAdapter<F, C>),
}

impl<F: PriceFeed, C: Clock> PriceOracleAdapter for ConfiguredAdapter<F, C> {
    fn now(&self) -> i64 {
        match self {
            Self::Single(adapter) => adapter.now(),
            Self::Dual(adapter) => adapter.now(),
        }
    }

    fn tick_at(&self, now: i64) -> AdapterResult<i32> {
        match self {
            Self::Single(adapter) => adapter.tick_at(now),
            Self::Dual(adapter) => adapter.tick_at(now),
        }
    }
}

impl<F, C> From<SingleFeedAdapter<F, C>> for ConfiguredAdapter<F, C> {
    fn from(adapter: SingleFeedAdapter<F, C>) -> Self {
        Self::Single(adapter)
    }
}

impl<F, C> From<DualFeedAdapter<F, C>> for ConfiguredAdapter<F, C> {
    fn from(adapter: DualFeedAdapter<F, C>) -> Self {
        Self::Dual(adapter)
    }
}
