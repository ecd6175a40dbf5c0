//! # Fixed-Point Normalization
//!
//! Converts mantissa/exponent samples into Q128.128 ratios expressed in the
//! target market's raw-unit convention, and derives cross ratios from two
//! feeds that share a quote asset.
//!
//! Both paths apply one effective power-of-ten exponent: non-negative
//! exponents multiply the numerator, negative exponents multiply the
//! denominator. Any exponent whose power of ten does not fit in 256 bits, and
//! any result that leaves `(0, 2^128)`, fails with `ScaleOverflow`.

use ethnum::U256;
use log::debug;

use crate::constants::{MAX_POW10_EXPONENT, RATIO_FRACTIONAL_BITS};
use crate::errors::{AdapterError, AdapterResult};
use crate::feed::{FeedId, PriceSample};

/// Strictly positive Q128.128 price ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DerivedRatio(U256);

impl DerivedRatio {
    /// Exactly 1.0
    pub const ONE: Self = Self(U256::from_words(1, 0));

    /// Wrap a raw Q128.128 value; zero is not a price
    pub fn from_raw(raw: U256) -> Option<Self> {
        if raw == U256::ZERO {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    /// Lossy float view, for diagnostics only
    pub fn to_f64(&self) -> f64 {
        let (hi, lo) = self.0.into_words();
        hi as f64 + lo as f64 / 2f64.powi(RATIO_FRACTIONAL_BITS as i32)
    }
}

/// 10^exponent in 256 bits
pub fn pow10(exponent: u32) -> Option<U256> {
    if exponent > MAX_POW10_EXPONENT {
        return None;
    }
    U256::new(10).checked_pow(exponent)
}

/// `numerator / denominator * 10^exponent` as a Q128.128 ratio
pub fn scale_ratio(
    numerator: u64,
    denominator: u64,
    exponent: i64,
) -> AdapterResult<DerivedRatio> {
    if denominator == 0 {
        return Err(AdapterError::MathOverflow);
    }

    let magnitude =
        u32::try_from(exponent.unsigned_abs()).map_err(|_| AdapterError::scale_overflow(exponent))?;
    let scale = pow10(magnitude).ok_or_else(|| AdapterError::scale_overflow(exponent))?;

    let mut num = U256::from(numerator) << RATIO_FRACTIONAL_BITS;
    let mut den = U256::from(denominator);
    if exponent >= 0 {
        num = num
            .checked_mul(scale)
            .ok_or_else(|| AdapterError::scale_overflow(exponent))?;
    } else {
        den = den
            .checked_mul(scale)
            .ok_or_else(|| AdapterError::scale_overflow(exponent))?;
    }

    // A quotient of zero means the price underflowed the fixed-point resolution
    DerivedRatio::from_raw(num / den).ok_or_else(|| AdapterError::scale_overflow(exponent))
}

/// Single-feed normalization: `mantissa * 10^(exponent + decimal_difference)`
///
/// `decimal_difference` is `token1_decimals - token0_decimals`; positive
/// values multiply the ratio, negative values divide it.
pub fn normalize(
    feed: &FeedId,
    sample: &PriceSample,
    decimal_difference: i8,
) -> AdapterResult<DerivedRatio> {
    let mantissa = sample.positive_mantissa(feed)?;
    let exponent = i64::from(sample.exponent) + i64::from(decimal_difference);
    let ratio = scale_ratio(mantissa, 1, exponent)?;
    debug!(
        "Normalized feed {}: mantissa={} exponent={} -> ratio~{:e}",
        feed,
        mantissa,
        exponent,
        ratio.to_f64()
    );
    Ok(ratio)
}

/// Dual-feed cross ratio: `(N / D) * 10^(N.exponent - D.exponent + decimal_difference)`
///
/// Both samples must quote the same asset. Orientation is fixed by which
/// feed is passed as the numerator.
pub fn combine(
    numerator: (&FeedId, &PriceSample),
    denominator: (&FeedId, &PriceSample),
    decimal_difference: i8,
) -> AdapterResult<DerivedRatio> {
    let (num_feed, num_sample) = numerator;
    let (den_feed, den_sample) = denominator;
    let num_mantissa = num_sample.positive_mantissa(num_feed)?;
    let den_mantissa = den_sample.positive_mantissa(den_feed)?;

    let exponent = i64::from(num_sample.exponent) - i64::from(den_sample.exponent)
        + i64::from(decimal_difference);
    let ratio = scale_ratio(num_mantissa, den_mantissa, exponent)?;
    debug!(
        "Combined feeds {} / {}: {}/{} exponent={} -> ratio~{:e}",
        num_feed,
        den_feed,
        num_mantissa,
        den_mantissa,
        exponent,
        ratio.to_f64()
    );
    Ok(ratio)
}
