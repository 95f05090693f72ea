//! Column names as constants for type safety

// Merged-data cache (one row per experiment/compound pair)
/// User identifier
pub const USER_ID: &str = "user_id";
/// User display name
pub const USER_NAME: &str = "user_name";
/// Experiment identifier
pub const EXPERIMENT_ID: &str = "experiment_id";
/// Experiment run time
pub const EXPERIMENT_RUN_TIME: &str = "experiment_run_time";
/// Compound identifier
pub const COMPOUND_ID: &str = "compound_id";
/// Compound name
pub const COMPOUND_NAME: &str = "compound_name";
/// Compound structure (molecular formula)
pub const COMPOUND_STRUCTURE: &str = "compound_structure";

// User metrics cache (one row per user)
/// Count of distinct experiments per user
pub const N_EXPERIMENTS: &str = "n_experiments";
/// Most frequent compound structure per user
pub const TOP_COMPOUND: &str = "top_compound";
/// Mean run time over exploded rows per user
pub const MEAN_EXPERIMENT_RUN_TIME: &str = "mean_experiment_run_time";

// Raw input columns that differ from the cache names
/// User name column in `users.csv`
pub const RAW_USER_NAME: &str = "name";
/// Semicolon-delimited compound list in `user_experiments.csv`
pub const RAW_EXPERIMENT_COMPOUND_IDS: &str = "experiment_compound_ids";
