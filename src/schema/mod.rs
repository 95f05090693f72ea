//! # Cache Table Schemas
//!
//! This module defines the Apache Arrow schemas of the two tables the pipeline
//! caches next to its inputs.
//!
//! ## Merged-data cache (`data.parquet`)
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | user_id | Int64 | User identifier |
//! | user_name | Utf8 | User display name |
//! | experiment_id | Int64 | Experiment identifier |
//! | experiment_run_time | Float64 | Run time, repeated per compound |
//! | compound_id | Int64 | Compound identifier |
//! | compound_name | Utf8 | Compound name |
//! | compound_structure | Utf8 | Molecular formula |
//!
//! ## User metrics cache (`user_metrics.parquet`)
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | user_id | Int64 | User identifier |
//! | user_name | Utf8 | User display name |
//! | n_experiments | UInt32 | Distinct experiments |
//! | top_compound | Utf8 | Most frequent compound structure |
//! | mean_experiment_run_time | Float64 | Mean run time over exploded rows |
//!
//! Both schemas carry the format version and a table tag as schema metadata,
//! which the cache writer copies into the Parquet footer.

use std::fmt;

mod builders;
/// Column name constants.
pub mod columns;
mod constants;
mod validation;

#[cfg(test)]
mod tests;

pub use builders::{
    create_merged_schema, create_merged_schema_arc, create_metrics_schema,
    create_metrics_schema_arc,
};
pub use columns::*;
pub use constants::*;
pub use validation::{
    is_compatible_type, required_columns, validate_schema, SchemaValidationError,
};

/// The two tables persisted by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTable {
    /// Denormalized experiment rows produced by the loader
    Merged,
    /// Per-user metrics produced by the extractor
    UserMetrics,
}

impl CacheTable {
    /// Tag stored under [`KEY_TABLE`] in the Parquet footer
    pub fn tag(&self) -> &'static str {
        match self {
            CacheTable::Merged => "merged",
            CacheTable::UserMetrics => "user_metrics",
        }
    }

    /// Parse a footer tag back into a table kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "merged" => Some(CacheTable::Merged),
            "user_metrics" => Some(CacheTable::UserMetrics),
            _ => None,
        }
    }
}

impl fmt::Display for CacheTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
