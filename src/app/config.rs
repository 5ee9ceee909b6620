//! Application configuration types

use mural_core::CanvasConfig;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub bench: BenchConfig,
}

/// Load generator settings for `mural bench`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Concurrent writer tasks
    #[serde(default = "default_writers")]
    pub writers: usize,
    /// Writes issued by each writer task
    #[serde(default = "default_writes_per_writer")]
    pub writes_per_writer: usize,
    /// Concurrent reader tasks
    #[serde(default = "default_readers")]
    pub readers: usize,
    /// Full reads issued by each reader task
    #[serde(default = "default_reads_per_reader")]
    pub reads_per_reader: usize,
}

fn default_writers() -> usize {
    8
}
fn default_writes_per_writer() -> usize {
    10_000
}
fn default_readers() -> usize {
    4
}
fn default_reads_per_reader() -> usize {
    200
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            writers: default_writers(),
            writes_per_writer: default_writes_per_writer(),
            readers: default_readers(),
            reads_per_reader: default_reads_per_reader(),
        }
    }
}
