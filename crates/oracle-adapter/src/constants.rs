//! # Adapter Constants
//!
//! Fundamental constants for the oracle adapter including:
//! - Fixed-point scale factors
//! - Tick bounds accepted by the sqrt-price reconstruction
//! - Logarithm conversion constants
//! - Observation ring conventions

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Q64 fixed-point scale factor: 2^64
pub const Q64: u128 = 1u128 << 64;

/// Fractional bits carried by a derived price ratio (Q128.128)
pub const RATIO_FRACTIONAL_BITS: u32 = 128;

/// Largest power of ten representable in 256 bits
pub const MAX_POW10_EXPONENT: u32 = 77;

// ============================================================================
// Tick Constants
// ============================================================================

/// Minimum tick accepted by the Q64.64 sqrt-price reconstruction
pub const MIN_TICK: i32 = -443_636;

/// Maximum tick accepted by the Q64.64 sqrt-price reconstruction
pub const MAX_TICK: i32 = 443_636;

/// 2^64 / log2(1.0001), truncated (127869479499801913173570.3996...)
///
/// Multiplying a Q64 base-2 logarithm by this value yields the base-1.0001
/// logarithm in Q128.
pub const LOG_1_0001_INV_X64: i128 = 127_869_479_499_801_913_173_570;

/// Default number of fractional log2 bits refined by the tick converter
pub const DEFAULT_PRECISION_BITS: u32 = 13;

/// Upper bound on fractional log2 bits (the Q64 fraction is exhausted)
pub const MAX_PRECISION_BITS: u32 = 64;

// ============================================================================
// Observation Ring Constants
// ============================================================================

/// Logical size of the emulated observation ring
pub const OBSERVATION_RING_SIZE: u16 = 65_535;

/// Index reported as the most recently written observation
pub const LATEST_OBSERVATION_INDEX: u16 = OBSERVATION_RING_SIZE - 1;

/// Protocol fee reported by the snapshot
pub const PROTOCOL_FEE: u8 = 0;

// ============================================================================
// Feed Constants
// ============================================================================

/// Default maximum tolerated sample age in seconds
pub const DEFAULT_MAX_AGE_SECONDS: u64 = 60;
