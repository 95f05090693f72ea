//! # Cache Files
//!
//! Parquet serialization of the two tables the pipeline memoizes next to its
//! inputs: the merged experiment table and the per-user metrics table.
//!
//! ## Writes
//!
//! Every file is written to a temporary file in the destination directory and
//! renamed into place once complete, so concurrent pipeline runs racing on the
//! same directory can only replace a whole file with another whole file.
//!
//! ## Footer Metadata
//!
//! - `compound_metrics:format_version`: cache format version
//! - `compound_metrics:table`: `merged` or `user_metrics`
//! - `compound_metrics:created_at`: write time (RFC 3339)
//! - `compound_metrics:run_id`: UUID shared by the files of one run
//! - `compound_metrics:writer_info`: crate name and version
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use compound_metrics::cache::{read_metrics, CacheConfig};
//!
//! let metrics = read_metrics(Path::new("data/user_metrics.parquet"), &CacheConfig::default())?;
//! for row in &metrics {
//!     println!("{}: {}", row.user_name, row.top_compound);
//! }
//! # Ok::<(), compound_metrics::cache::CacheError>(())
//! ```

mod config;
mod error;
mod reader;
mod utils;
mod writer;


pub use config::CacheConfig;
pub use error::CacheError;
pub use reader::{read_cache_info, read_merged, read_metrics, CacheFileInfo};
pub use writer::{write_merged, write_metrics, CacheFooter, CacheWriteStats};
