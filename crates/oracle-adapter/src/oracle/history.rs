//! # Synthetic Observation History
//!
//! A logical ring of `OBSERVATION_RING_SIZE` observations with no storage
//! behind it. Every answer is derived from the current tick and the call-time
//! clock: slot `i` is stamped `now - (R - 1) + i` and every cumulative is
//! `tick * timestamp`.
//!
//! For any two observations produced from the same tick, the difference of
//! the cumulatives divided by the difference of the timestamps is exactly
//! that tick, so a consumer's TWAP always converges to the current price.

use serde::{Deserialize, Serialize};

use crate::constants::{LATEST_OBSERVATION_INDEX, OBSERVATION_RING_SIZE, PROTOCOL_FEE};
use crate::errors::{AdapterError, AdapterResult};
use crate::math::sqrt_price_at_tick;

/// Pool state snapshot (`slot0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot0 {
    /// Q64.64 sqrt price rebuilt from `tick`
    pub sqrt_price_x64: u128,
    pub tick: i32,
    /// Always the last slot of the ring
    pub observation_index: u16,
    /// Always reported full
    pub observation_cardinality: u16,
    pub observation_cardinality_next: u16,
    pub fee_protocol: u8,
    pub unlocked: bool,
}

/// One ring slot (`observations(index)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub block_timestamp: i64,
    /// tick * block_timestamp
    pub tick_cumulative: i128,
    /// Always zero
    pub seconds_per_liquidity_cumulative_x128: u128,
    /// Always true
    pub initialized: bool,
}

/// Output of `observe(ages)`; both vectors match the input length and order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserveResult {
    pub tick_cumulatives: Vec<i128>,
    pub seconds_per_liquidity_cumulative_x128s: Vec<u128>,
}

impl ObserveResult {
    pub fn len(&self) -> usize {
        self.tick_cumulatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tick_cumulatives.is_empty()
    }
}

/// History view for one (tick, now) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticHistory {
    tick: i32,
    now: i64,
}

impl SyntheticHistory {
    pub fn new(tick: i32, now: i64) -> Self {
        Self { tick, now }
    }

    pub fn tick(&self) -> i32 {
        self.tick
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    /// Cumulative tick as of `timestamp`
    pub fn tick_cumulative_at(&self, timestamp: i64) -> i128 {
        i128::from(self.tick) * i128::from(timestamp)
    }

    /// Timestamp assigned to ring slot `index`
    pub fn timestamp_of(&self, index: u16) -> i64 {
        self.now - i64::from(LATEST_OBSERVATION_INDEX) + i64::from(index)
    }

    pub fn slot0(&self) -> AdapterResult<Slot0> {
        Ok(Slot0 {
            sqrt_price_x64: sqrt_price_at_tick(self.tick)?,
            tick: self.tick,
            observation_index: LATEST_OBSERVATION_INDEX,
            observation_cardinality: OBSERVATION_RING_SIZE,
            observation_cardinality_next: OBSERVATION_RING_SIZE,
            fee_protocol: PROTOCOL_FEE,
            unlocked: true,
        })
    }

    pub fn observation(&self, index: u16) -> AdapterResult<Observation> {
        if index >= OBSERVATION_RING_SIZE {
            return Err(AdapterError::InvalidObservationIndex(index));
        }
        let block_timestamp = self.timestamp_of(index);
        Ok(Observation {
            block_timestamp,
            tick_cumulative: self.tick_cumulative_at(block_timestamp),
            seconds_per_liquidity_cumulative_x128: 0,
            initialized: true,
        })
    }

    /// Cumulatives `ages` seconds before now; no lookback limit applies
    pub fn observe(&self, ages: &[u32]) -> ObserveResult {
        let tick_cumulatives = ages
            .iter()
            .map(|age| self.tick_cumulative_at(self.now - i64::from(*age)))
            .collect();
        ObserveResult {
            tick_cumulatives,
            seconds_per_liquidity_cumulative_x128s: vec![0; ages.len()],
        }
    }
}
