//! Canvas configuration
//!
//! Fixed parameters handed to a store at construction. They never change
//! for the lifetime of a store.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Records a working snapshot may run ahead of the shared one before promotion
pub const DEFAULT_PROMOTION_THRESHOLD: u64 = 100;

/// Canvas configuration (deserializable from TOML)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Number of columns
    #[serde(default = "default_width")]
    pub width: u32,
    /// Number of rows
    #[serde(default = "default_height")]
    pub height: u32,
    /// Minimum time between two admitted changes from one writer, in microseconds
    #[serde(default = "default_rate_window_micros")]
    pub rate_window_micros: i64,
    /// How far the working snapshot may advance past the shared snapshot
    /// before a read promotes a fresh copy
    #[serde(default = "default_promotion_threshold")]
    pub promotion_threshold: u64,
}

fn default_width() -> u32 {
    1000
}
fn default_height() -> u32 {
    1000
}
fn default_rate_window_micros() -> i64 {
    5_000_000
}
fn default_promotion_threshold() -> u64 {
    DEFAULT_PROMOTION_THRESHOLD
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            rate_window_micros: default_rate_window_micros(),
            promotion_threshold: default_promotion_threshold(),
        }
    }
}

impl CanvasConfig {
    /// Create a config for the given dimensions with default limits
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the rate window
    #[must_use]
    pub fn with_rate_window_micros(mut self, window: i64) -> Self {
        self.rate_window_micros = window;
        self
    }

    /// Set the promotion threshold
    #[must_use]
    pub fn with_promotion_threshold(mut self, threshold: u64) -> Self {
        self.promotion_threshold = threshold;
        self
    }

    /// Total number of cells
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check the configuration can back a store
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_config(format!(
                "canvas dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if (self.width as usize).checked_mul(self.height as usize).is_none() {
            return Err(Error::invalid_config(format!(
                "canvas of {}x{} cells does not fit in memory",
                self.width, self.height
            )));
        }
        if self.rate_window_micros <= 0 {
            return Err(Error::invalid_config(format!(
                "rate window must be positive, got {}",
                self.rate_window_micros
            )));
        }
        Ok(())
    }
}
