//! Clock sources for call-time timestamps

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of the call-time unix timestamp (seconds)
pub trait Clock {
    fn unix_timestamp(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn unix_timestamp(&self) -> i64 {
        (**self).unix_timestamp()
    }
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually driven clock for tests and replay
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
