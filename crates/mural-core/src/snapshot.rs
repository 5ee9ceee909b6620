//! Grid snapshots
//!
//! A snapshot is a dense materialization of the canvas as of some log
//! position. Snapshots are plain values: cloning one duplicates the whole
//! cell array, and a clone never observes later changes to its source.

use serde::Serialize;

use crate::cell::Cell;
use crate::record::ChangeRecord;

/// Full canvas state after the first `applied_through` records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSnapshot {
    width: u32,
    height: u32,
    /// Row-major cells, indexed `y * width + x`
    cells: Vec<Cell>,
    /// Number of log records reflected, i.e. the next unread sequence number
    applied_through: u64,
}

impl GridSnapshot {
    /// Create a snapshot where every coordinate holds its default cell.
    ///
    /// Dimensions are validated by [`CanvasConfig`](crate::CanvasConfig)
    /// before a store builds its snapshots.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::blank(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
            applied_through: 0,
        }
    }

    /// Replay records onto this snapshot, in order, last write wins.
    ///
    /// Callers pass the suffix starting at [`applied_through`](Self::applied_through).
    /// Replaying records that were already applied rewrites the same values
    /// and leaves the position unchanged.
    pub fn apply(&mut self, records: &[ChangeRecord]) {
        let Some(last) = records.last() else {
            return;
        };

        for record in records {
            if let Some(index) = self.index_of(record.cell.x, record.cell.y) {
                self.cells[index] = record.cell;
            }
        }

        self.applied_through = self.applied_through.max(last.sequence + 1);
    }

    /// Canvas width
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of log records reflected by this snapshot
    #[must_use]
    pub fn applied_through(&self) -> u64 {
        self.applied_through
    }

    /// All cells in row-major order
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether a coordinate lies on the canvas
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Index of a coordinate in [`cells`](Self::cells)
    #[must_use]
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at a coordinate
    #[must_use]
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index_of(x, y).map(|index| &self.cells[index])
    }

    /// Cells that some writer has set
    pub fn painted_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|cell| cell.is_painted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: u64, x: u32, y: u32, color: u32) -> ChangeRecord {
        ChangeRecord::new(sequence, sequence as i64, Cell::new(x, y, color, sequence))
    }

    #[test]
    fn test_new_snapshot_is_blank() {
        let snapshot = GridSnapshot::new(3, 2);
        assert_eq!(snapshot.cells().len(), 6);
        assert_eq!(snapshot.applied_through(), 0);
        assert_eq!(snapshot.painted_cells().count(), 0);

        // Row-major layout carries each coordinate
        assert_eq!(snapshot.cells()[4], Cell::blank(1, 1));
        assert_eq!(snapshot.cell(2, 1), Some(&Cell::blank(2, 1)));
    }

    #[test]
    fn test_index_bounds() {
        let snapshot = GridSnapshot::new(3, 2);
        assert_eq!(snapshot.index_of(2, 1), Some(5));
        assert_eq!(snapshot.index_of(3, 0), None);
        assert_eq!(snapshot.index_of(0, 2), None);
        assert!(snapshot.cell(3, 3).is_none());
    }

    #[test]
    fn test_apply_last_write_wins() {
        let mut snapshot = GridSnapshot::new(2, 2);
        snapshot.apply(&[record(0, 0, 0, 5), record(1, 1, 1, 6), record(2, 0, 0, 7)]);

        assert_eq!(snapshot.applied_through(), 3);
        assert_eq!(snapshot.cell(0, 0).unwrap().color, 7);
        assert_eq!(snapshot.cell(0, 0).unwrap().writer, Some(2));
        assert_eq!(snapshot.cell(1, 1).unwrap().color, 6);
        assert_eq!(snapshot.cell(1, 0), Some(&Cell::blank(1, 0)));
    }

    #[test]
    fn test_apply_incrementally() {
        let records = [record(0, 0, 0, 1), record(1, 1, 0, 2), record(2, 0, 1, 3)];

        let mut snapshot = GridSnapshot::new(2, 2);
        snapshot.apply(&records[..1]);
        assert_eq!(snapshot.applied_through(), 1);

        let from = snapshot.applied_through() as usize;
        snapshot.apply(&records[from..]);
        assert_eq!(snapshot.applied_through(), 3);

        let mut full = GridSnapshot::new(2, 2);
        full.apply(&records);
        assert_eq!(snapshot, full);
    }

    #[test]
    fn test_reapplying_prefix_is_harmless() {
        let records = [record(0, 0, 0, 1), record(1, 0, 0, 2)];

        let mut snapshot = GridSnapshot::new(1, 1);
        snapshot.apply(&records);
        let before = snapshot.clone();

        snapshot.apply(&records);
        assert_eq!(snapshot, before);
        assert_eq!(snapshot.applied_through(), 2);
    }

    #[test]
    fn test_apply_empty_is_noop() {
        let mut snapshot = GridSnapshot::new(2, 2);
        snapshot.apply(&[]);
        assert_eq!(snapshot.applied_through(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = GridSnapshot::new(2, 1);
        let copy = original.clone();

        original.apply(&[record(0, 1, 0, 9)]);
        assert_eq!(copy.cell(1, 0), Some(&Cell::blank(1, 0)));
        assert_eq!(copy.applied_through(), 0);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut snapshot = GridSnapshot::new(1, 2);
        snapshot.apply(&[record(0, 0, 1, 3)]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["width"], 1);
        assert_eq!(json["applied_through"], 1);
        assert_eq!(json["cells"].as_array().unwrap().len(), 2);
        assert_eq!(json["cells"][1]["color"], 3);
    }
}
