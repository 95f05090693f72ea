//! Typed rows flowing through the pipeline.
//!
//! Raw records mirror the three input tables after pollution stripping and
//! column normalization. [`DenormalizedExperimentRow`] is the merged,
//! exploded table persisted as the merged-data cache, and [`UserMetricsRow`]
//! is the final per-user table persisted as the metrics cache.

use serde::{Deserialize, Serialize};

/// A row of `compounds.csv`
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundRecord {
    /// Compound identifier referenced by experiments
    pub compound_id: i64,
    /// Human-readable compound name
    pub compound_name: String,
    /// Molecular formula (e.g. `C21H30O2`)
    pub compound_structure: String,
}

/// A row of `users.csv`, projected to the columns the pipeline uses
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// User identifier
    pub user_id: i64,
    /// Display name (the `name` column of the source file)
    pub user_name: String,
}

/// A row of `user_experiments.csv` before explosion
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRecord {
    /// Owning user
    pub user_id: i64,
    /// Experiment identifier
    pub experiment_id: i64,
    /// Run time of the experiment
    pub experiment_run_time: f64,
    /// Compounds used, in source order
    pub compound_ids: Vec<i64>,
}

/// One (experiment, compound) pair joined with its user and compound details
#[derive(Debug, Clone, PartialEq)]
pub struct DenormalizedExperimentRow {
    /// Owning user
    pub user_id: i64,
    /// Name of the owning user
    pub user_name: String,
    /// Experiment identifier
    pub experiment_id: i64,
    /// Run time of the experiment, repeated for every compound it references
    pub experiment_run_time: f64,
    /// Compound referenced by this row
    pub compound_id: i64,
    /// Name of the referenced compound
    pub compound_name: String,
    /// Structure of the referenced compound
    pub compound_structure: String,
}

/// Aggregated metrics for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetricsRow {
    /// User identifier
    pub user_id: i64,
    /// Name of the user
    pub user_name: String,
    /// Number of distinct experiments run by the user
    pub n_experiments: u32,
    /// Most frequently used compound structure
    pub top_compound: String,
    /// Mean run time over all exploded (experiment, compound) rows
    pub mean_experiment_run_time: f64,
}

impl UserMetricsRow {
    /// Project to the fields exposed by the by-user read path
    pub fn features(&self) -> UserFeatures {
        UserFeatures {
            n_experiments: self.n_experiments,
            top_compound: self.top_compound.clone(),
            mean_experiment_run_time: self.mean_experiment_run_time,
        }
    }
}

/// Metrics returned when looking up a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeatures {
    /// Number of distinct experiments run by the user
    pub n_experiments: u32,
    /// Most frequently used compound structure
    pub top_compound: String,
    /// Mean run time over all exploded rows
    pub mean_experiment_run_time: f64,
}
