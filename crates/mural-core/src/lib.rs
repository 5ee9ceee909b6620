//! Mural Core - Canvas Engine
//!
//! This crate provides the concurrent update/snapshot engine for Mural:
//! - Cell: Position, color and last writer of one grid coordinate
//! - Record: Sequence-numbered, timestamped cell mutations
//! - Log: Append-only update log, the source of truth for canvas history
//! - Snapshot: Dense grid materialized by replaying records
//! - Rate Limiter: Per-writer cooldown gate
//! - Clock: Time source abstraction
//! - Store: Orchestrates writes, snapshot advancement and promotion
//!
//! ## Usage
//!
//! ```
//! use mural_core::{CanvasConfig, CanvasStore};
//!
//! let store = CanvasStore::new(CanvasConfig::new(4, 4)).unwrap();
//! assert!(store.write(1, 2, 7, 42));
//!
//! let snapshot = store.read();
//! assert_eq!(snapshot.cell(1, 2).unwrap().color, 7);
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! [canvas]
//! width = 1000
//! height = 1000
//! rate_window_micros = 5000000
//! promotion_threshold = 100
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cell;
pub mod clock;
pub mod config;
pub mod error;
pub mod log;
pub mod rate_limiter;
pub mod record;
pub mod snapshot;
pub mod store;

// Re-export main types
pub use cell::{Cell, ColorId, WriterId, DEFAULT_COLOR};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CanvasConfig, DEFAULT_PROMOTION_THRESHOLD};
pub use error::{Error, Result, WriteRejection};
pub use log::UpdateLog;
pub use rate_limiter::{RateLimitResult, RateLimiter};
pub use record::ChangeRecord;
pub use snapshot::GridSnapshot;
pub use store::{CanvasStore, StoreStats};
