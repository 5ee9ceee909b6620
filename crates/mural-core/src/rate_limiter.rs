//! Per-writer rate limiting
//!
//! Each writer may have at most one change admitted per window. The limiter
//! only remembers the last admitted timestamp per writer; the window is a
//! fixed cooldown measured from that timestamp.
//!
//! The limiter is not synchronized. [`CanvasStore`](crate::CanvasStore)
//! calls it under the same exclusive lock as the log append, which is what
//! makes check-and-update atomic per writer.

use std::collections::HashMap;

use crate::cell::WriterId;

/// Result of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the change is admitted
    pub allowed: bool,
    /// Remaining cooldown in microseconds (zero when admitted)
    pub retry_after_micros: i64,
}

impl RateLimitResult {
    /// Create an allowed result
    fn allowed() -> Self {
        Self {
            allowed: true,
            retry_after_micros: 0,
        }
    }

    /// Create a denied result
    fn denied(retry_after_micros: i64) -> Self {
        Self {
            allowed: false,
            retry_after_micros,
        }
    }
}

/// Fixed-window cooldown gate keyed by writer
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window_micros: i64,
    /// Map of writer -> last admitted timestamp
    last_admitted: HashMap<WriterId, i64>,
}

impl RateLimiter {
    /// Create a new rate limiter with a cooldown in microseconds
    #[must_use]
    pub fn new(window_micros: i64) -> Self {
        Self {
            window_micros,
            last_admitted: HashMap::new(),
        }
    }

    /// Check a writer at time `now` and record the admission if allowed.
    ///
    /// A rejected check leaves the writer's timestamp untouched, so retrying
    /// early does not extend the cooldown.
    pub fn try_admit(&mut self, writer: WriterId, now: i64) -> RateLimitResult {
        match self.last_admitted.get_mut(&writer) {
            Some(last) => {
                let elapsed = now.saturating_sub(*last);
                if elapsed < self.window_micros {
                    RateLimitResult::denied(self.window_micros.saturating_sub(elapsed))
                } else {
                    *last = now;
                    RateLimitResult::allowed()
                }
            }
            None => {
                self.last_admitted.insert(writer, now);
                RateLimitResult::allowed()
            }
        }
    }

    /// Record an admission without checking, keeping the latest timestamp.
    ///
    /// Used when rebuilding limiter state from a persisted log.
    pub fn seed(&mut self, writer: WriterId, timestamp: i64) {
        self.last_admitted
            .entry(writer)
            .and_modify(|last| *last = (*last).max(timestamp))
            .or_insert(timestamp);
    }

    /// Timestamp of a writer's last admitted change
    #[must_use]
    pub fn last_admitted(&self, writer: WriterId) -> Option<i64> {
        self.last_admitted.get(&writer).copied()
    }

    /// Number of distinct writers seen
    #[must_use]
    pub fn writer_count(&self) -> usize {
        self.last_admitted.len()
    }

    /// Cooldown in microseconds
    #[must_use]
    pub fn window_micros(&self) -> i64 {
        self.window_micros
    }
}
