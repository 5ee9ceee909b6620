//! Time sources
//!
//! The store timestamps every admitted change with microseconds since the
//! Unix epoch. Coarse resolution is fine; the value only feeds the rate
//! limiter and the persisted record.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of the current time in microseconds
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current time in microseconds since the Unix epoch
    fn now_micros(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> i64 {
        Utc::now().timestamp_micros()
    }
}

/// Manually driven clock for tests, demos and log replays.
///
/// Each read returns the current value and then advances it by `step`,
/// so a non-zero step makes every read strictly later than the previous one.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
    step: i64,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    #[must_use]
    pub fn new(start: i64) -> Self {
        Self::with_step(start, 0)
    }

    /// Create a clock that advances by `step` after every read
    #[must_use]
    pub fn with_step(start: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
            step,
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move forward by `delta` microseconds
    pub fn advance(&self, delta: i64) {
        self.now.fetch_add(delta, Ordering::SeqCst);
    }

    /// Current value without advancing
    #[must_use]
    pub fn peek(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}
