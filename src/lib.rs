//! # compound-metrics - Per-User Experiment Metrics
//!
//! `compound_metrics` turns three flat tables (compounds, users and
//! experiments) into one row of behavioral metrics per user, and memoizes the
//! intermediate and final tables as Parquet files next to the inputs.
//!
//! ## Key Features
//!
//! - **Tolerant Ingestion**: Comma-delimited inputs polluted with stray tab
//!   characters are cleaned before parsing; columns are matched by name.
//!
//! - **Explode and Join**: Multi-compound experiments fan out into one row per
//!   compound, joined with user names and compound details.
//!
//! - **Per-User Metrics**: Distinct experiment count, most frequent compound
//!   structure and mean run time over exploded rows.
//!
//! - **Two-Level Cache**: `data.parquet` (merged rows) and
//!   `user_metrics.parquet` (final table), written atomically and reused on the
//!   next run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use compound_metrics::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::default();
//! for row in pipeline.run(Path::new("data"))? {
//!     println!(
//!         "{} ran {} experiments, mostly {} ({:.2} avg)",
//!         row.user_name, row.n_experiments, row.top_compound, row.mean_experiment_run_time
//!     );
//! }
//! # Ok::<(), compound_metrics::pipeline::PipelineError>(())
//! ```
//!
//! ## Input Directory Layout
//!
//! ```text
//! data/
//! ├── compounds.csv           # compound_id, compound_name, compound_structure
//! ├── users.csv               # user_id, name, ...
//! ├── user_experiments.csv    # user_id, experiment_id, experiment_run_time, experiment_compound_ids
//! ├── data.parquet            # merged-data cache (written by the pipeline)
//! └── user_metrics.parquet    # final-metrics cache (written by the pipeline)
//! ```
//!
//! ## Architecture
//!
//! - [`loader`]: raw table cleaning, parsing, joining and explosion
//! - [`metrics`]: per-user aggregations
//! - [`cache`]: Parquet cache files
//! - [`pipeline`]: cache-aware orchestration
//! - [`schema`]: Arrow schemas and column names of the cache tables
//! - [`records`]: typed rows

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod records;
pub mod schema;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::cache::{CacheConfig, CacheError};
    pub use crate::loader::{LoadError, LoaderConfig};
    pub use crate::metrics::extract_metrics;
    pub use crate::pipeline::{MetricsSource, Pipeline, PipelineConfig, PipelineError, PipelineReport};
    pub use crate::records::{
        CompoundRecord, DenormalizedExperimentRow, ExperimentRecord, UserFeatures, UserMetricsRow,
        UserRecord,
    };
}

pub use pipeline::run;
