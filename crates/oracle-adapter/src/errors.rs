//! # Adapter Error Types
//!
//! Every failure is fatal to the query that raised it. Callers should treat
//! any error as "oracle temporarily unavailable"; no partial result is ever
//! returned alongside an error.

use thiserror::Error;

use crate::feed::FeedId;

/// Errors raised while answering an oracle query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    // ========================================================================
    // Feed Errors
    // ========================================================================
    #[error("Stale feed {feed}: sample age {age}s exceeds max age {max_age}s")]
    StaleFeed { feed: FeedId, age: u64, max_age: u64 },

    #[error("Invalid price from feed {feed}: mantissa {mantissa} is not positive")]
    InvalidPrice { feed: FeedId, mantissa: i64 },

    #[error("Feed {0} not found")]
    FeedNotFound(FeedId),

    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),

    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Decimal scale 10^{exponent} exceeds the representable ratio range")]
    ScaleOverflow { exponent: i64 },

    #[error("Tick {0} outside the reconstructable range")]
    TickOutOfRange(i32),

    #[error("Math overflow")]
    MathOverflow,

    #[error("Invalid log2 precision: {0} bits (expected 1..=64)")]
    InvalidPrecision(u32),

    // ========================================================================
    // Query Errors
    // ========================================================================
    #[error("Observation index {0} out of range")]
    InvalidObservationIndex(u16),

    #[error("Invalid timestamp window")]
    InvalidTimestamp,

    #[error("Observe returned {actual} cumulatives for {expected} ages")]
    ObserveLengthMismatch { expected: usize, actual: usize },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type using adapter errors
pub type AdapterResult<T> = Result<T, AdapterError>;

impl AdapterError {
    /// Create a scale overflow error for an effective decimal exponent
    pub fn scale_overflow(exponent: impl Into<i64>) -> Self {
        Self::ScaleOverflow {
            exponent: exponent.into(),
        }
    }

    /// Create a configuration error with a parameter name and expectation
    pub fn invalid_config(parameter: &str, expected: &str) -> Self {
        Self::InvalidConfig(format!("{parameter}: expected {expected}"))
    }

    /// Whether the error comes from the upstream feed rather than the math
    pub fn is_feed_error(&self) -> bool {
        matches!(
            self,
            Self::StaleFeed { .. }
                | Self::InvalidPrice { .. }
                | Self::FeedNotFound(_)
                | Self::FeedUnavailable(_)
        )
    }
}

impl From<std::io::Error> for AdapterError {
    fn from(err: std::io::Error) -> Self {
        AdapterError::FeedUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::FeedUnavailable(err.to_string())
    }
}
