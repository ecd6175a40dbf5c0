//! # Adapter Configuration
//!
//! Construction-time configuration for the two adapter modes. Values are
//! validated once when an adapter is built and never change afterwards.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PRECISION_BITS;
use crate::errors::{AdapterError, AdapterResult};
use crate::feed::{FeedId, StalenessPolicy};
use crate::math::check_precision;

fn default_precision_bits() -> u32 {
    DEFAULT_PRECISION_BITS
}

/// Target market adjustment applied on top of the raw feed price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketAdjustment {
    /// `token1_decimals - token0_decimals`
    #[serde(default)]
    pub decimal_difference: i8,

    /// Quote the reciprocal of the feed price
    #[serde(default)]
    pub invert: bool,
}

impl MarketAdjustment {
    /// Adjustment from the two token decimal counts
    pub fn from_decimals(
        token0_decimals: u8,
        token1_decimals: u8,
        invert: bool,
    ) -> AdapterResult<Self> {
        let difference = i16::from(token1_decimals) - i16::from(token0_decimals);
        let decimal_difference = i8::try_from(difference).map_err(|_| {
            AdapterError::invalid_config("decimal_difference", "a value in -128..=127")
        })?;
        Ok(Self {
            decimal_difference,
            invert,
        })
    }
}

/// Single feed quoting token0 in units of token1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleFeedConfig {
    pub feed_id: FeedId,

    pub staleness: StalenessPolicy,

    #[serde(default)]
    pub adjustment: MarketAdjustment,

    /// Fractional log2 bits refined by the tick converter
    #[serde(default = "default_precision_bits")]
    pub precision_bits: u32,
}

impl SingleFeedConfig {
    pub fn new(feed_id: FeedId, staleness: StalenessPolicy, adjustment: MarketAdjustment) -> Self {
        Self {
            feed_id,
            staleness,
            adjustment,
            precision_bits: DEFAULT_PRECISION_BITS,
        }
    }

    pub fn with_precision_bits(mut self, precision_bits: u32) -> Self {
        self.precision_bits = precision_bits;
        self
    }

    pub fn validate(&self) -> AdapterResult<()> {
        check_precision(self.precision_bits)?;
        Ok(())
    }
}

/// Two feeds sharing a quote asset; the market price is numerator / denominator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualFeedConfig {
    pub numerator: FeedId,

    pub denominator: FeedId,

    pub staleness: StalenessPolicy,

    /// `token1_decimals - token0_decimals`
    #[serde(default)]
    pub decimal_difference: i8,

    #[serde(default = "default_precision_bits")]
    pub precision_bits: u32,
}

impl DualFeedConfig {
    pub fn new(
        numerator: FeedId,
        denominator: FeedId,
        staleness: StalenessPolicy,
        decimal_difference: i8,
    ) -> Self {
        Self {
            numerator,
            denominator,
            staleness,
            decimal_difference,
            precision_bits: DEFAULT_PRECISION_BITS,
        }
    }

    pub fn with_precision_bits(mut self, precision_bits: u32) -> Self {
        self.precision_bits = precision_bits;
        self
    }

    pub fn validate(&self) -> AdapterResult<()> {
        if self.numerator == self.denominator {
            return Err(AdapterError::invalid_config(
                "denominator",
                "a feed different from the numerator",
            ));
        }
        check_precision(self.precision_bits)?;
        Ok(())
    }
}
