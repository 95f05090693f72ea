use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use compound_metrics::pipeline::{Pipeline, PipelineConfig};

mod config;
mod info;
mod run;
mod user;

pub use config::Config;

/// compound-metrics - per-user experiment metrics with Parquet caching
#[derive(Parser)]
#[command(name = "compound-metrics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute (or load cached) metrics for every user in a directory
    Run {
        /// Directory holding compounds.csv, users.csv and user_experiments.csv
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the metrics of a single user as JSON
    User {
        /// Input directory
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// User identifier
        #[arg(value_name = "USER_ID")]
        user_id: i64,
    },

    /// Display information about a cache file
    Info {
        /// Cache Parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    fn pipeline(&self) -> Result<Pipeline> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
                .pipeline,
            None => PipelineConfig::default(),
        };
        Ok(Pipeline::new(config))
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let pipeline = cli.pipeline()?;

    match cli.command {
        Commands::Run { directory, json } => run::run(&pipeline, directory, json),
        Commands::User { directory, user_id } => user::run(&pipeline, directory, user_id),
        Commands::Info { file } => info::run(file),
    }
}
