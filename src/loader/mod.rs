//! # Loader/Merger
//!
//! Reads the three raw tables of an input directory and joins them into the
//! denormalized experiment table:
//!
//! ```text
//! compounds.csv ─────────────────────────────┐
//! users.csv ──────────┐                      │ lookup
//! user_experiments.csv ┴─ join on user_id ─ explode ─ resolve ─> Vec<DenormalizedExperimentRow>
//! ```
//!
//! ## Input format
//!
//! The inputs are comma-delimited with a header row, but upstream exports pad
//! fields with stray tab characters. Those are stripped from the whole text
//! before CSV parsing (see [`strip_stray_separators`]). Columns are looked up
//! by name after trimming, so extra columns and column order do not matter.
//!
//! ## Failure policy
//!
//! Loading is all-or-nothing: a missing file, an unparseable field or a
//! compound id absent from `compounds.csv` aborts with a [`LoadError`]. The
//! only rows silently dropped are experiments whose user is not listed in
//! `users.csv`.

mod clean;
mod error;
mod merge;
mod tables;


use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

pub use clean::{strip_stray_separators, RawTable};
pub use error::LoadError;
pub use merge::merge_records;
pub use tables::{parse_compounds, parse_experiments, parse_users, split_compound_ids};

use crate::records::DenormalizedExperimentRow;

/// Default raw compound table file name
pub const COMPOUNDS_FILE: &str = "compounds.csv";
/// Default raw user table file name
pub const USERS_FILE: &str = "users.csv";
/// Default raw experiment table file name
pub const EXPERIMENTS_FILE: &str = "user_experiments.csv";

/// Configuration for reading and merging the raw tables
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Compound table file name, relative to the input directory
    pub compounds_file: String,

    /// User table file name, relative to the input directory
    pub users_file: String,

    /// Experiment table file name, relative to the input directory
    pub experiments_file: String,

    /// Characters removed from the raw text before CSV parsing
    pub stray_separators: String,

    /// Separator inside the `experiment_compound_ids` field
    pub compound_id_delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            compounds_file: COMPOUNDS_FILE.to_string(),
            users_file: USERS_FILE.to_string(),
            experiments_file: EXPERIMENTS_FILE.to_string(),
            stray_separators: "\t".to_string(),
            compound_id_delimiter: ';',
        }
    }
}

impl LoaderConfig {
    /// Paths of the compound, user and experiment tables inside `directory`
    pub fn input_paths(&self, directory: &Path) -> [PathBuf; 3] {
        [
            directory.join(&self.compounds_file),
            directory.join(&self.users_file),
            directory.join(&self.experiments_file),
        ]
    }
}

/// Merge three raw sources into the denormalized experiment table
pub fn merge<C: Read, U: Read, E: Read>(
    compounds: C,
    users: U,
    experiments: E,
    config: &LoaderConfig,
) -> Result<Vec<DenormalizedExperimentRow>, LoadError> {
    let stray = config.stray_separators.as_str();

    let compounds = RawTable::from_reader(&config.compounds_file, compounds, stray)?;
    let users = RawTable::from_reader(&config.users_file, users, stray)?;
    let experiments = RawTable::from_reader(&config.experiments_file, experiments, stray)?;

    let compounds = parse_compounds(&compounds)?;
    let users = parse_users(&users)?;
    let experiments = parse_experiments(&experiments, config.compound_id_delimiter)?;
    debug!(
        "Parsed {} compounds, {} users, {} experiments",
        compounds.len(),
        users.len(),
        experiments.len()
    );

    merge_records(&compounds, &users, &experiments)
}

fn open_input(path: &Path) -> Result<BufReader<File>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    Ok(BufReader::new(File::open(path)?))
}

/// Merge the raw tables found in `directory`.
///
/// All three files are checked before any is parsed.
pub fn merge_directory(
    directory: &Path,
    config: &LoaderConfig,
) -> Result<Vec<DenormalizedExperimentRow>, LoadError> {
    let [compounds_path, users_path, experiments_path] = config.input_paths(directory);

    let compounds = open_input(&compounds_path)?;
    let users = open_input(&users_path)?;
    let experiments = open_input(&experiments_path)?;

    let rows = merge(compounds, users, experiments, config)?;
    info!(
        "Merged {} experiment rows from {}",
        rows.len(),
        directory.display()
    );
    Ok(rows)
}
