//! Concurrent load generator
//!
//! Writers and readers run on the blocking pool since the store API is
//! synchronous. Every write uses a fresh writer id, so rejections only come
//! from the bounds check, which the generator never trips.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use mural_core::{CanvasConfig, CanvasStore, StoreStats};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::app::config::BenchConfig;

/// Outcome of a bench run
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub admitted: u64,
    pub rejected: u64,
    pub reads: u64,
    pub elapsed: Duration,
    pub stats: StoreStats,
}

enum Worker {
    Writer { admitted: u64, rejected: u64 },
    Reader { reads: u64 },
}

/// Run the bench and log a summary
pub async fn run(canvas: CanvasConfig, settings: BenchConfig) -> Result<BenchReport> {
    let store = Arc::new(CanvasStore::new(canvas.clone())?);
    let started = Instant::now();

    info!(
        writers = settings.writers,
        writes_per_writer = settings.writes_per_writer,
        readers = settings.readers,
        reads_per_reader = settings.reads_per_reader,
        "Starting bench"
    );

    let mut workers = JoinSet::new();

    for w in 0..settings.writers {
        let store = Arc::clone(&store);
        let writes = settings.writes_per_writer;
        let (width, height) = (canvas.width, canvas.height);
        workers.spawn_blocking(move || {
            let mut seed = w as u64 + 1;
            let (mut admitted, mut rejected) = (0, 0);
            for i in 0..writes {
                seed = seed
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let x = (seed >> 32) as u32 % width;
                let y = (seed >> 16) as u32 % height;
                let color = (seed >> 56) as u32;
                let writer = (w * writes + i) as u64;
                if store.write(x, y, color, writer) {
                    admitted += 1;
                } else {
                    rejected += 1;
                }
            }
            Worker::Writer { admitted, rejected }
        });
    }

    for r in 0..settings.readers {
        let store = Arc::clone(&store);
        let reads = settings.reads_per_reader;
        workers.spawn_blocking(move || {
            let mut last = 0;
            for _ in 0..reads {
                let snapshot = store.read();
                last = snapshot.applied_through();
            }
            debug!(reader = r, applied_through = last, "reader finished");
            Worker::Reader {
                reads: reads as u64,
            }
        });
    }

    let (mut admitted, mut rejected, mut reads) = (0, 0, 0);
    while let Some(result) = workers.join_next().await {
        match result.context("bench worker panicked")? {
            Worker::Writer {
                admitted: a,
                rejected: r,
            } => {
                admitted += a;
                rejected += r;
            }
            Worker::Reader { reads: n } => reads += n,
        }
    }

    let elapsed = started.elapsed();
    let stats = store.stats();
    ensure!(
        stats.log_len == admitted,
        "log holds {} records but {} writes were admitted",
        stats.log_len,
        admitted
    );

    info!(
        admitted,
        rejected,
        reads,
        elapsed_ms = elapsed.as_millis() as u64,
        promotions = stats.promotions,
        "Bench finished"
    );

    Ok(BenchReport {
        admitted,
        rejected,
        reads,
        elapsed,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_small_run() {
        let canvas = CanvasConfig::new(16, 16).with_promotion_threshold(10);
        let settings = BenchConfig {
            writers: 3,
            writes_per_writer: 50,
            readers: 2,
            reads_per_reader: 5,
        };

        let report = tokio_test::block_on(run(canvas, settings)).unwrap();
        assert_eq!(report.admitted, 150);
        assert_eq!(report.rejected, 0);
        assert_eq!(report.reads, 10);
        assert_eq!(report.stats.log_len, 150);
        assert_eq!(report.stats.writers, 150);
    }
}
