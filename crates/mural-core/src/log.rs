//! Update log
//!
//! Append-only history of every admitted change. Position in the log equals
//! the record's sequence number; nothing is ever removed or reordered.

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::record::ChangeRecord;

/// Append-only, sequence-indexed list of change records
#[derive(Debug, Clone, Default)]
pub struct UpdateLog {
    records: Vec<ChangeRecord>,
}

impl UpdateLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from previously appended records.
    ///
    /// Fails if the records are not numbered `0, 1, 2, ...` in order.
    pub fn from_records(records: Vec<ChangeRecord>) -> Result<Self> {
        for (expected, record) in records.iter().enumerate() {
            let expected = expected as u64;
            if record.sequence != expected {
                return Err(Error::SequenceGap {
                    expected,
                    found: record.sequence,
                });
            }
        }
        Ok(Self { records })
    }

    /// Append a cell change and return its sequence number
    pub fn append(&mut self, timestamp: i64, cell: Cell) -> u64 {
        let sequence = self.records.len() as u64;
        self.records.push(ChangeRecord::new(sequence, timestamp, cell));
        sequence
    }

    /// Number of records in the log
    #[must_use]
    pub fn len(&self) -> u64 {
        self.records.len() as u64
    }

    /// Whether the log has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from position `from` (inclusive) to the tail, in order.
    ///
    /// Empty when `from >= len()`.
    #[must_use]
    pub fn records_from(&self, from: u64) -> &[ChangeRecord] {
        let start = usize::try_from(from)
            .unwrap_or(usize::MAX)
            .min(self.records.len());
        &self.records[start..]
    }

    /// Record at a sequence number
    #[must_use]
    pub fn get(&self, sequence: u64) -> Option<&ChangeRecord> {
        usize::try_from(sequence)
            .ok()
            .and_then(|index| self.records.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_positions() {
        let mut log = UpdateLog::new();
        assert!(log.is_empty());

        for i in 0..5u32 {
            let seq = log.append(i64::from(i) * 10, Cell::new(i, 0, 1, 1));
            assert_eq!(seq, u64::from(i));
        }

        assert_eq!(log.len(), 5);
        for (i, record) in log.records_from(0).iter().enumerate() {
            assert_eq!(record.sequence, i as u64);
        }
        assert_eq!(log.get(3).unwrap().timestamp, 30);
        assert!(log.get(5).is_none());
    }

    #[test]
    fn test_records_from_suffix() {
        let mut log = UpdateLog::new();
        log.append(0, Cell::new(0, 0, 1, 1));
        log.append(1, Cell::new(1, 0, 2, 2));
        log.append(2, Cell::new(2, 0, 3, 3));

        let suffix = log.records_from(1);
        assert_eq!(suffix.len(), 2);
        assert_eq!(suffix[0].sequence, 1);
        assert_eq!(suffix[1].cell.color, 3);

        assert!(log.records_from(3).is_empty());
        assert!(log.records_from(100).is_empty());
    }

    #[test]
    fn test_from_records_rejects_gap() {
        let records = vec![
            ChangeRecord::new(0, 0, Cell::new(0, 0, 1, 1)),
            ChangeRecord::new(2, 1, Cell::new(0, 0, 2, 1)),
        ];

        match UpdateLog::from_records(records) {
            Err(Error::SequenceGap { expected, found }) => {
                assert_eq!(expected, 1);
                assert_eq!(found, 2);
            }
            other => panic!("expected sequence gap, got {other:?}"),
        }
    }

    #[test]
    fn test_from_records_continues_numbering() {
        let records = vec![
            ChangeRecord::new(0, 0, Cell::new(0, 0, 1, 1)),
            ChangeRecord::new(1, 5, Cell::new(1, 1, 2, 2)),
        ];
        let mut log = UpdateLog::from_records(records).unwrap();
        assert_eq!(log.append(9, Cell::new(0, 1, 3, 3)), 2);
    }
}
