//! Canvas cells
//!
//! A cell is the display state of one grid coordinate: its color and the
//! writer who last set it.

use serde::{Deserialize, Serialize};

/// Opaque palette identifier
pub type ColorId = u32;

/// Identity of a writer (one user or client)
pub type WriterId = u64;

/// Color of a coordinate nobody has written to
pub const DEFAULT_COLOR: ColorId = 0;

/// One grid coordinate's color and last writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column, `0..width`
    pub x: u32,
    /// Row, `0..height`
    pub y: u32,
    /// Palette color
    pub color: ColorId,
    /// Writer that set this cell, `None` for an untouched coordinate
    pub writer: Option<WriterId>,
}

impl Cell {
    /// Create a cell written by `writer`
    #[must_use]
    pub fn new(x: u32, y: u32, color: ColorId, writer: WriterId) -> Self {
        Self {
            x,
            y,
            color,
            writer: Some(writer),
        }
    }

    /// Create the default cell for a coordinate
    #[must_use]
    pub fn blank(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            color: DEFAULT_COLOR,
            writer: None,
        }
    }

    /// Whether any writer has set this cell
    #[must_use]
    pub fn is_painted(&self) -> bool {
        self.writer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cell_has_no_writer() {
        let cell = Cell::blank(3, 4);
        assert_eq!(cell.color, DEFAULT_COLOR);
        assert_eq!(cell.writer, None);
        assert!(!cell.is_painted());
    }

    #[test]
    fn test_writer_zero_is_not_blank() {
        let cell = Cell::new(0, 0, DEFAULT_COLOR, 0);
        assert!(cell.is_painted());
        assert_ne!(cell, Cell::blank(0, 0));
    }

    #[test]
    fn test_cell_serialization() {
        let cell = Cell::new(1, 2, 9, 77);
        let json = serde_json::to_string(&cell).unwrap();
        assert!(json.contains("\"writer\":77"));

        let parsed: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cell);
    }
}
