//! # compound-metrics
//!
//! Command-line driver for the per-user metrics pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Compute metrics for a directory (writes data.parquet and user_metrics.parquet)
//! compound-metrics run data/
//!
//! # Metrics of a single user
//! compound-metrics user data/ 1
//!
//! # Inspect a cache file
//! compound-metrics info data/user_metrics.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
