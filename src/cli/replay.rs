//! Rebuild a canvas from a persisted update log
//!
//! The input holds one JSON-encoded change record per line, in sequence
//! order. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use mural_core::{CanvasConfig, CanvasStore, ChangeRecord, SystemClock};
use tracing::info;

/// Restore a store from `input` and print a summary
pub fn run(canvas: CanvasConfig, input: &Path, dump: bool) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let records = parse_records(BufReader::new(file))?;
    info!(records = records.len(), path = %input.display(), "Loaded update log");

    let store = CanvasStore::restore(canvas, Arc::new(SystemClock), records)
        .context("Failed to restore canvas")?;
    let snapshot = store.read();

    if dump {
        let json = serde_json::to_string(&snapshot).context("Failed to encode snapshot")?;
        println!("{json}");
    } else {
        let stats = store.stats();
        println!(
            "{} records from {} writers, {} painted cells on a {}x{} canvas",
            stats.log_len,
            stats.writers,
            snapshot.painted_cells().count(),
            snapshot.width(),
            snapshot.height()
        );
    }

    Ok(())
}

/// Parse JSON-lines change records
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<ChangeRecord>> {
    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", number + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ChangeRecord = serde_json::from_str(&line)
            .with_context(|| format!("Invalid change record on line {}", number + 1))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = r#"{"sequence":0,"timestamp":10,"cell":{"x":0,"y":0,"color":3,"writer":1}}

{"sequence":1,"timestamp":20,"cell":{"x":1,"y":0,"color":4,"writer":2}}
"#;

    #[test]
    fn test_parse_records() {
        let records = parse_records(Cursor::new(LOG)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sequence, 1);
        assert_eq!(records[1].cell.writer, Some(2));
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_records(Cursor::new("{\"sequence\":0}\nnot json\n")).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parsed_records_restore() {
        let records = parse_records(Cursor::new(LOG)).unwrap();
        let store =
            CanvasStore::restore(CanvasConfig::new(2, 1), Arc::new(SystemClock), records).unwrap();

        let snapshot = store.read();
        assert_eq!(snapshot.cell(0, 0).unwrap().color, 3);
        assert_eq!(snapshot.cell(1, 0).unwrap().color, 4);
    }
}
