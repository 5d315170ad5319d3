//! Monefy Aggregator CLI
//!
//! Command-line interface for aggregating Monefy backup snapshots.
//!
//! # Usage
//!
//! ```bash
//! monefy-aggregator snapshots/
//! monefy-aggregator --format json --summarize --out-dir results/ snapshots/
//! monefy-aggregator --latest snapshots/
//! monefy-aggregator --save --out-dir mirror/ snapshots/
//! ```
//!
//! The program selects the latest `monefy-<timestamp>.csv` snapshot in the
//! given directory, runs the aggregation pipeline, and prints the path of
//! the written result file. Diagnostics go to stderr via `tracing`
//! (filterable with `RUST_LOG`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Internal or upstream failure (no snapshot, malformed data, I/O)
//! - 2: Unsupported output format (user-input error)

use monefy_aggregator::cli;
use monefy_aggregator::core::AggregationEngine;
use monefy_aggregator::storage::DirStore;
use monefy_aggregator::types::AggregationError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    // All configuration is assembled once here and passed by value; the
    // engine itself receives nothing but the storage boundary.
    let store = DirStore::new(&args.snapshot_dir, &args.out_dir);
    let engine = AggregationEngine::new(store);

    if let Err(error) = run(&engine, &args) {
        tracing::error!(%error, "aggregation failed");
        let code = match error {
            AggregationError::UnsupportedFormat { .. } => 2,
            _ => 1,
        };
        process::exit(code);
    }
}

fn run(
    engine: &AggregationEngine<DirStore>,
    args: &cli::CliArgs,
) -> Result<(), AggregationError> {
    if args.latest {
        println!("{}", engine.latest_snapshot_name()?);
        return Ok(());
    }

    if args.save {
        for path in engine.save_snapshots()? {
            println!("{path}");
        }
        return Ok(());
    }

    let path = engine.get_result(&args.format, args.summarize)?;
    println!("{path}");
    Ok(())
}
