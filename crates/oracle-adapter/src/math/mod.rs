//! # Price Math
//!
//! Pure functions turning feed samples into ticks and sqrt prices:
//! decimal-scale normalization, dual-feed cross pricing, the bounded-error
//! logarithmic tick converter, and the final orientation/reconstruction step.

pub mod log_tick;
pub mod scale;
pub mod tick_math;

// Re-export commonly used functions
pub use log_tick::*;
pub use scale::*;
pub use tick_math::*;
