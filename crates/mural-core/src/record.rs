//! Change records
//!
//! The unit stored in the update log.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// A committed cell mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Position in the update log, assigned at append time
    pub sequence: u64,
    /// Logical write time in microseconds since the Unix epoch
    pub timestamp: i64,
    /// The written cell
    pub cell: Cell,
}

impl ChangeRecord {
    /// Create a change record
    #[must_use]
    pub fn new(sequence: u64, timestamp: i64, cell: Cell) -> Self {
        Self {
            sequence,
            timestamp,
            cell,
        }
    }
}
