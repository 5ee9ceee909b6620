//! Canvas Store
//!
//! Orchestrates writes and reads against one shared canvas.
//!
//! One reader-writer lock guards the update log, the rate limiter and the
//! working snapshot together. Writes hold it exclusively for the rate check
//! and the append. Reads hold it exclusively only long enough to advance the
//! working snapshot and pick up the shared "recent" snapshot, then copy that
//! snapshot with no lock held, and finally replay the few records newer than
//! it under the shared lock.
//!
//! The recent snapshot is published as an `Arc` that is replaced on
//! promotion and never mutated, so a reader can keep using (and cloning) the
//! one it picked up after the lock is gone.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::cell::{Cell, ColorId, WriterId};
use crate::clock::{Clock, SystemClock};
use crate::config::CanvasConfig;
use crate::error::{Error, Result, WriteRejection};
use crate::log::UpdateLog;
use crate::rate_limiter::RateLimiter;
use crate::record::ChangeRecord;
use crate::snapshot::GridSnapshot;

/// State guarded by the store lock
struct StoreState {
    log: UpdateLog,
    limiter: RateLimiter,
    /// Advanced to the log tail on every read; only touched under the exclusive lock
    working: GridSnapshot,
    /// Last promoted copy of `working`, shared with readers
    recent: Arc<GridSnapshot>,
    promotions: u64,
}

/// Point-in-time counters for a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Records in the update log
    pub log_len: u64,
    /// Distinct writers seen by the rate limiter
    pub writers: usize,
    /// Log position of the working snapshot
    pub working_applied_through: u64,
    /// Log position of the shared recent snapshot
    pub recent_applied_through: u64,
    /// Number of promotions since construction
    pub promotions: u64,
}

/// Shared canvas with an append-only update log and amortized snapshots
pub struct CanvasStore {
    config: CanvasConfig,
    clock: Arc<dyn Clock>,
    state: RwLock<StoreState>,
}

impl CanvasStore {
    /// Create an empty store timestamped by the system clock
    pub fn new(config: CanvasConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an empty store with a specific clock
    pub fn with_clock(config: CanvasConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let working = GridSnapshot::new(config.width, config.height);
        let recent = Arc::new(working.clone());
        let state = StoreState {
            log: UpdateLog::new(),
            limiter: RateLimiter::new(config.rate_window_micros),
            working,
            recent,
            promotions: 0,
        };

        info!(
            width = config.width,
            height = config.height,
            rate_window_micros = config.rate_window_micros,
            promotion_threshold = config.promotion_threshold,
            "Canvas store created"
        );

        Ok(Self {
            config,
            clock,
            state: RwLock::new(state),
        })
    }

    /// Rebuild a store from a persisted update log.
    ///
    /// The records must be numbered from zero without gaps and lie on the
    /// canvas. Each writer's cooldown resumes from their latest record, and
    /// both snapshots start at the log tail.
    #[instrument(skip(config, clock, records), fields(records = records.len()))]
    pub fn restore(
        config: CanvasConfig,
        clock: Arc<dyn Clock>,
        records: Vec<ChangeRecord>,
    ) -> Result<Self> {
        config.validate()?;

        if let Some(record) = records
            .iter()
            .find(|r| r.cell.x >= config.width || r.cell.y >= config.height)
        {
            return Err(Error::RecordOutOfBounds {
                sequence: record.sequence,
                x: record.cell.x,
                y: record.cell.y,
            });
        }

        if let Some(record) = records.iter().find(|r| r.cell.writer.is_none()) {
            return Err(Error::RecordWithoutWriter {
                sequence: record.sequence,
            });
        }

        let log = UpdateLog::from_records(records)?;

        let mut limiter = RateLimiter::new(config.rate_window_micros);
        for record in log.records_from(0) {
            if let Some(writer) = record.cell.writer {
                limiter.seed(writer, record.timestamp);
            }
        }

        let mut working = GridSnapshot::new(config.width, config.height);
        working.apply(log.records_from(0));
        let recent = Arc::new(working.clone());

        info!(
            log_len = log.len(),
            writers = limiter.writer_count(),
            "Canvas store restored"
        );

        Ok(Self {
            config,
            clock,
            state: RwLock::new(StoreState {
                log,
                limiter,
                working,
                recent,
                promotions: 0,
            }),
        })
    }

    /// Configuration this store was built with
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Set a cell, returning the sequence number of the new change record.
    ///
    /// Out-of-bounds coordinates are rejected before the lock is taken or
    /// the clock is read. Otherwise the rate check and the append happen
    /// under one exclusive lock, so two racing writes from the same writer
    /// can never both be admitted.
    pub fn try_write(
        &self,
        x: u32,
        y: u32,
        color: ColorId,
        writer: WriterId,
    ) -> std::result::Result<u64, WriteRejection> {
        if x >= self.config.width || y >= self.config.height {
            trace!(x, y, writer, "write out of bounds");
            return Err(WriteRejection::OutOfBounds {
                x,
                y,
                width: self.config.width,
                height: self.config.height,
            });
        }

        let mut state = self.state.write();

        // Read the clock under the lock so timestamps follow sequence order
        let now = self.clock.now_micros();

        let admission = state.limiter.try_admit(writer, now);
        if !admission.allowed {
            trace!(
                writer,
                retry_after_micros = admission.retry_after_micros,
                "write rate limited"
            );
            return Err(WriteRejection::RateLimited {
                retry_after_micros: admission.retry_after_micros,
            });
        }

        let sequence = state.log.append(now, Cell::new(x, y, color, writer));
        trace!(sequence, x, y, color, writer, "write admitted");
        Ok(sequence)
    }

    /// Set a cell, returning whether the write was admitted
    pub fn write(&self, x: u32, y: u32, color: ColorId, writer: WriterId) -> bool {
        self.try_write(x, y, color, writer).is_ok()
    }

    /// Current canvas state.
    ///
    /// The result reflects every write that returned before this call began,
    /// and possibly some that raced with it. It is always a prefix of the log:
    /// it never includes a record without every record before it.
    pub fn read(&self) -> GridSnapshot {
        let recent = {
            let mut guard = self.state.write();
            let state = &mut *guard;

            let from = state.working.applied_through();
            state.working.apply(state.log.records_from(from));

            let lag = state.working.applied_through() - state.recent.applied_through();
            if lag > self.config.promotion_threshold {
                debug!(
                    from = state.recent.applied_through(),
                    to = state.working.applied_through(),
                    "Promoting recent snapshot"
                );
                state.recent = Arc::new(state.working.clone());
                state.promotions += 1;
            }

            Arc::clone(&state.recent)
        };

        // Full copy with no lock held; `recent` is never mutated once published
        let mut snapshot = GridSnapshot::clone(&recent);
        drop(recent);

        let state = self.state.read();
        snapshot.apply(state.log.records_from(snapshot.applied_through()));
        snapshot
    }

    /// Change records from log position `from` onwards.
    ///
    /// Lets a client holding a snapshot at `from` catch up without a full copy.
    #[must_use]
    pub fn records_since(&self, from: u64) -> Vec<ChangeRecord> {
        self.state.read().log.records_from(from).to_vec()
    }

    /// Number of records in the update log
    #[must_use]
    pub fn log_len(&self) -> u64 {
        self.state.read().log.len()
    }

    /// The currently published recent snapshot
    #[must_use]
    pub fn recent_snapshot(&self) -> Arc<GridSnapshot> {
        Arc::clone(&self.state.read().recent)
    }

    /// Point-in-time counters
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let state = self.state.read();
        StoreStats {
            log_len: state.log.len(),
            writers: state.limiter.writer_count(),
            working_applied_through: state.working.applied_through(),
            recent_applied_through: state.recent.applied_through(),
            promotions: state.promotions,
        }
    }
}
