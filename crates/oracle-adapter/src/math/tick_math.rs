//! # Tick Orientation and Sqrt-Price Reconstruction
//!
//! The final steps of the price pipeline: optionally flip the tick to the
//! reciprocal orientation, check it against the reconstructable range, and
//! map it to a Q64.64 sqrt price with the Orca Whirlpools core tick math.
//!
//! The reconstructed sqrt price is tick-snapped. A native pool derives its
//! tick from a more precise sqrt price; here the tick comes first and the
//! sqrt price is rebuilt from it, so the sqrt price carries no more
//! information than the tick.

use orca_whirlpools_core::tick_index_to_sqrt_price;

use crate::constants::{MAX_TICK, MIN_TICK};
use crate::errors::{AdapterError, AdapterResult};

/// Negate the tick when the market quotes the reciprocal of the feed
pub fn orient_tick(tick: i32, invert: bool) -> i32 {
    if invert {
        -tick
    } else {
        tick
    }
}

/// Check if a tick is within the supported range
pub fn is_tick_valid(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Reject ticks the sqrt-price reconstruction cannot represent
pub fn ensure_tick_in_range(tick: i32) -> AdapterResult<i32> {
    if !is_tick_valid(tick) {
        return Err(AdapterError::TickOutOfRange(tick));
    }
    Ok(tick)
}

/// Q64.64 sqrt price at `tick`
pub fn sqrt_price_at_tick(tick: i32) -> AdapterResult<u128> {
    let tick = ensure_tick_in_range(tick)?;
    Ok(tick_index_to_sqrt_price(tick).into())
}
