//! # Consumer-Side TWAP
//!
//! What a pool consumer computes on top of `observe`: the arithmetic mean
//! tick over a window, and the sqrt price at that tick. Against the
//! synthetic history the mean is always the current tick.

use super::PriceOracleAdapter;
use crate::errors::{AdapterError, AdapterResult};
use crate::math::sqrt_price_at_tick;

/// Mean tick between two cumulatives `window` seconds apart
///
/// Rounds toward negative infinity, matching the usual consumer library.
pub fn arithmetic_mean_tick(
    tick_cumulative_start: i128,
    tick_cumulative_end: i128,
    window: u32,
) -> AdapterResult<i32> {
    if window == 0 {
        return Err(AdapterError::InvalidTimestamp);
    }
    let window = i128::from(window);
    let tick_delta = tick_cumulative_end
        .checked_sub(tick_cumulative_start)
        .ok_or(AdapterError::MathOverflow)?;

    let mean = tick_delta.div_euclid(window);
    i32::try_from(mean).map_err(|_| AdapterError::MathOverflow)
}

/// Mean tick over the last `window` seconds, via `observe([window, 0])`
pub fn consult<A: PriceOracleAdapter + ?Sized>(adapter: &A, window: u32) -> AdapterResult<i32> {
    let observed = adapter.observe_ages(&[window, 0])?;
    match observed.tick_cumulatives.as_slice() {
        [start, end] => arithmetic_mean_tick(*start, *end, window),
        other => Err(AdapterError::ObserveLengthMismatch {
            expected: 2,
            actual: other.len(),
        }),
    }
}

/// Q64.64 sqrt price at the mean tick over the last `window` seconds
pub fn twap_sqrt_price<A: PriceOracleAdapter + ?Sized>(
    adapter: &A,
    window: u32,
) -> AdapterResult<u128> {
    sqrt_price_at_tick(consult(adapter, window)?)
}
