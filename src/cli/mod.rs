//! CLI module for Mural
//!
//! Provides commands:
//! - `demo`: Walk through writes, a rate-limit rejection and a read
//! - `bench`: Concurrent writers and readers against one store
//! - `replay`: Rebuild a store from a JSON-lines update log

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod bench;
pub mod demo;
pub mod replay;

/// Mural canvas CLI
#[derive(Parser, Debug)]
#[command(name = "mural")]
#[command(about = "Shared pixel canvas engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a small scripted scenario on a 2x2 canvas
    Demo,
    /// Hammer a store with concurrent writers and readers
    Bench {
        /// Concurrent writer tasks
        #[arg(long)]
        writers: Option<usize>,
        /// Writes per writer task
        #[arg(long)]
        writes: Option<usize>,
        /// Concurrent reader tasks
        #[arg(long)]
        readers: Option<usize>,
        /// Reads per reader task
        #[arg(long)]
        reads: Option<usize>,
    },
    /// Rebuild a canvas from a JSON-lines file of change records
    Replay {
        /// Path to the update log
        input: PathBuf,
        /// Print the resulting snapshot as JSON
        #[arg(long)]
        dump: bool,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Demo) => demo::run(),
        Some(Commands::Bench {
            writers,
            writes,
            readers,
            reads,
        }) => {
            let app = crate::app::load_config()?;
            let mut settings = app.bench;
            settings.writers = writers.unwrap_or(settings.writers);
            settings.writes_per_writer = writes.unwrap_or(settings.writes_per_writer);
            settings.readers = readers.unwrap_or(settings.readers);
            settings.reads_per_reader = reads.unwrap_or(settings.reads_per_reader);
            let report = bench::run(app.canvas, settings).await?;
            println!(
                "admitted {} writes ({} rejected) and served {} reads in {:.2?}",
                report.admitted, report.rejected, report.reads, report.elapsed
            );
            println!(
                "log length {}, {} promotions, recent snapshot at {}",
                report.stats.log_len, report.stats.promotions, report.stats.recent_applied_through
            );
            Ok(())
        }
        Some(Commands::Replay { input, dump }) => {
            let app = crate::app::load_config()?;
            replay::run(app.canvas, &input, dump)
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
