//! Pipeline orchestration
//!
//! Sequences the loader and the metrics extractor behind a two-level cache
//! stored next to the inputs:
//!
//! 1. `user_metrics.parquet` present: returned as-is.
//! 2. `data.parquet` present: loaded instead of re-merging the raw tables.
//! 3. Otherwise the raw tables are merged and `data.parquet` is written.
//! 4. Metrics are extracted, written to `user_metrics.parquet` and returned.
//!
//! Cache files are trusted by presence alone. Editing the raw tables after a
//! cache exists has no effect until the cache files are removed.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::cache::{self, CacheConfig, CacheError, CacheFooter};
use crate::loader::{self, LoadError, LoaderConfig};
use crate::metrics::{extract_metrics, find_user};
use crate::records::{UserFeatures, UserMetricsRow};

/// Default merged-data cache file name
pub const MERGED_CACHE_FILE: &str = "data.parquet";
/// Default final-metrics cache file name
pub const METRICS_CACHE_FILE: &str = "user_metrics.parquet";

/// Errors surfaced by a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reading or merging the raw tables failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Reading or writing a cache file failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The metrics table has no row for the requested user
    #[error("No user with ID '{0}'")]
    UserNotFound(i64),
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Merged-data cache file name, relative to the input directory
    pub merged_cache_file: String,

    /// Final-metrics cache file name, relative to the input directory
    pub metrics_cache_file: String,

    /// Raw table reading options
    pub loader: LoaderConfig,

    /// Cache file options
    pub cache: CacheConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            merged_cache_file: MERGED_CACHE_FILE.to_string(),
            metrics_cache_file: METRICS_CACHE_FILE.to_string(),
            loader: LoaderConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Where the returned metrics came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsSource {
    /// Loaded from the final-metrics cache; nothing was recomputed
    MetricsCache,
    /// Extracted from the merged-data cache
    MergedCache,
    /// Merged from the raw tables and extracted
    RawSources,
}

impl fmt::Display for MetricsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsSource::MetricsCache => write!(f, "metrics cache"),
            MetricsSource::MergedCache => write!(f, "merged-data cache"),
            MetricsSource::RawSources => write!(f, "raw sources"),
        }
    }
}

/// Result of a pipeline run with cache bookkeeping
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// One row per user
    pub metrics: Vec<UserMetricsRow>,
    /// Which cache level (if any) served the request
    pub source: MetricsSource,
    /// Cache files created by this run
    pub files_written: Vec<PathBuf>,
}

/// Runs the ETL pipeline against input directories
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Location of the merged-data cache for `directory`
    pub fn merged_cache_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.config.merged_cache_file)
    }

    /// Location of the final-metrics cache for `directory`
    pub fn metrics_cache_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.config.metrics_cache_file)
    }

    /// Compute (or load) the per-user metrics of `directory`
    pub fn run(&self, directory: &Path) -> Result<Vec<UserMetricsRow>, PipelineError> {
        Ok(self.run_with_report(directory)?.metrics)
    }

    /// Like [`Pipeline::run`], also reporting which cache level was used
    pub fn run_with_report(&self, directory: &Path) -> Result<PipelineReport, PipelineError> {
        let metrics_path = self.metrics_cache_path(directory);
        let merged_path = self.merged_cache_path(directory);
        let cache_config = &self.config.cache;

        if metrics_path.is_file() {
            info!("Loading cached metrics from {}", metrics_path.display());
            let metrics = cache::read_metrics(&metrics_path, cache_config)?;
            return Ok(PipelineReport {
                metrics,
                source: MetricsSource::MetricsCache,
                files_written: Vec::new(),
            });
        }

        let footer = CacheFooter::new();
        let mut files_written = Vec::new();

        let (data, source) = if merged_path.is_file() {
            info!("Loading cached merged data from {}", merged_path.display());
            (cache::read_merged(&merged_path, cache_config)?, MetricsSource::MergedCache)
        } else {
            info!("Merging raw tables in {}", directory.display());
            let data = loader::merge_directory(directory, &self.config.loader)?;
            cache::write_merged(&merged_path, &data, cache_config, &footer)?;
            files_written.push(merged_path);
            (data, MetricsSource::RawSources)
        };

        let metrics = extract_metrics(&data);
        cache::write_metrics(&metrics_path, &metrics, cache_config, &footer)?;
        files_written.push(metrics_path);

        debug!(
            "Run {} produced {} user rows from {}",
            footer.run_id,
            metrics.len(),
            source
        );

        Ok(PipelineReport {
            metrics,
            source,
            files_written,
        })
    }

    /// Run the pipeline and return the metrics of a single user
    pub fn lookup_user(&self, directory: &Path, user_id: i64) -> Result<UserFeatures, PipelineError> {
        let metrics = self.run(directory)?;
        find_user(&metrics, user_id).ok_or(PipelineError::UserNotFound(user_id))
    }
}

/// Run the pipeline on `directory` with the default configuration
pub fn run(directory: &Path) -> Result<Vec<UserMetricsRow>, PipelineError> {
    Pipeline::default().run(directory)
}
