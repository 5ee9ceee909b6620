//! Scripted walkthrough on a tiny canvas

use std::sync::Arc;

use anyhow::{Context, Result};
use mural_core::{CanvasConfig, CanvasStore, GridSnapshot, ManualClock};
use tracing::info;

const WINDOW_MICROS: i64 = 5_000_000;
const WRITER: u64 = 1;

/// Run the demo and print the final snapshot
pub fn run() -> Result<()> {
    let snapshot = script()?;
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
    println!("{json}");
    Ok(())
}

fn script() -> Result<GridSnapshot> {
    let clock = Arc::new(ManualClock::new(0));
    let config = CanvasConfig::new(2, 2).with_rate_window_micros(WINDOW_MICROS);
    let store = CanvasStore::with_clock(config, clock.clone())?;

    let steps = [(0, 7), (1_000_000, 9), (6_000_000, 9)];
    for (at, color) in steps {
        clock.set(at);
        match store.try_write(0, 0, color, WRITER) {
            Ok(sequence) => info!(at, color, sequence, "write admitted"),
            Err(rejection) => info!(at, color, reason = rejection.code(), "write rejected: {rejection}"),
        }
        info!(log_len = store.log_len(), "log length");
    }

    Ok(store.read())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_script() {
        let snapshot = script().unwrap();
        assert_eq!(snapshot.applied_through(), 2);

        let cell = snapshot.cell(0, 0).unwrap();
        assert_eq!(cell.color, 9);
        assert_eq!(cell.writer, Some(WRITER));
        assert_eq!(snapshot.painted_cells().count(), 1);
    }
}
