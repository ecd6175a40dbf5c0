//! # Logarithmic Tick Converter
//!
//! Approximates `log_1.0001(ratio)` for a Q128.128 ratio in `(0, 2^128)`:
//!
//! 1. The integer part of `log2(ratio)` is the most significant bit index
//!    minus 128.
//! 2. The ratio is normalized into `[1, 2)` (Q1.127 in a `u128`).
//! 3. Each iteration squares the normalized value; if the square reaches 2
//!    the current fractional bit is set and the value is halved. One bit is
//!    produced per iteration, most significant first, for `precision_bits`
//!    iterations.
//! 4. The Q64 base-2 logarithm is multiplied by `2^64 / log2(1.0001)` and
//!    rounded to the nearest integer tick.
//!
//! The refined fraction is a floor, so half of the next bit is added before
//! the base change. With the default 13 bits the truncation window is
//! `2^-13 * 6931.8 ≈ 0.85` ticks, centred to ±0.42. Rounding to the nearest
//! tick adds up to 0.5 more, so the worst case is about 0.92 ticks and the
//! result stays within one tick of the exact logarithm.
//!
//! The logarithm is signed: ratios below 1.0 produce negative ticks. No
//! absolute value is taken at any point.

use ethnum::{I256, U256};
use log::debug;

use super::scale::DerivedRatio;
use crate::constants::{LOG_1_0001_INV_X64, MAX_PRECISION_BITS, RATIO_FRACTIONAL_BITS};
use crate::errors::{AdapterError, AdapterResult};

/// Validate a fractional-bit precision setting
pub fn check_precision(precision_bits: u32) -> AdapterResult<u32> {
    if precision_bits == 0 || precision_bits > MAX_PRECISION_BITS {
        return Err(AdapterError::InvalidPrecision(precision_bits));
    }
    Ok(precision_bits)
}

/// Signed base-2 logarithm of a ratio in Q64.64, refined to `precision_bits`
/// fractional bits (floor of the true value at that precision)
pub fn log2_x64(ratio: DerivedRatio, precision_bits: u32) -> AdapterResult<i128> {
    let precision_bits = check_precision(precision_bits)?;
    let raw = ratio.raw();

    // Integer portion from the msb; raw is non-zero so msb is in 0..=255
    let msb: u32 = 255 - raw.leading_zeros();
    let log2_integer_x64 = (msb as i128 - RATIO_FRACTIONAL_BITS as i128) << 64;

    // Normalize into [2^127, 2^128): Q1.127 in [1, 2)
    let mut r: u128 = if msb >= 127 {
        (raw >> (msb - 127)).as_u128()
    } else {
        (raw << (127 - msb)).as_u128()
    };

    // We begin the iteration from bit 63 (0.5 in Q64.64)
    let mut bit: i128 = 1i128 << 63;
    let mut log2_fraction_x64: i128 = 0;

    for _ in 0..precision_bits {
        // r^2 in Q2.254; bit 255 set means r^2 >= 2
        let squared = U256::from(r) * U256::from(r);
        let is_r_more_than_two = (squared >> 255u32).as_u32();
        r = (squared >> (127 + is_r_more_than_two)).as_u128();
        log2_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
    }

    Ok(log2_integer_x64 + log2_fraction_x64)
}

/// Tick whose `1.0001^tick` is nearest to `ratio`, within one tick
pub fn ratio_to_tick(ratio: DerivedRatio, precision_bits: u32) -> AdapterResult<i32> {
    let log2_floor_x64 = log2_x64(ratio, precision_bits)?;

    // Centre the truncated fraction: add half of the last refined bit
    let half_step_x64 = (1i128 << 63) >> precision_bits;
    let log2_x64 = log2_floor_x64 + half_step_x64;

    // Transform from base 2 to base 1.0001 (Q128 result), then round to nearest
    let tick_x128 = I256::from(log2_x64) * I256::from(LOG_1_0001_INV_X64);
    let half = I256::ONE << 127u32;
    let tick = ((tick_x128 + half) >> 128u32).as_i32();

    debug!(
        "ratio~{:e} -> log2_x64={} -> tick={} ({} bits)",
        ratio.to_f64(),
        log2_x64,
        tick,
        precision_bits
    );
    Ok(tick)
}
