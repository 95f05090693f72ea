//! TOML configuration file support.
//!
//! Every key is optional; missing keys keep their defaults:
//!
//! ```toml
//! # compound-metrics.toml
//! [pipeline]
//! merged_cache_file = "data.parquet"
//! metrics_cache_file = "user_metrics.parquet"
//!
//! [pipeline.loader]
//! stray_separators = "\t"
//! compound_id_delimiter = ";"
//!
//! [pipeline.cache]
//! compression_level = 9
//! row_group_size = 100000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use compound_metrics::pipeline::PipelineConfig;

/// Root configuration structure for compound-metrics.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [pipeline]
            metrics_cache_file = "metrics.parquet"

            [pipeline.loader]
            stray_separators = "|"
            compound_id_delimiter = ":"

            [pipeline.cache]
            compression_level = 9
            row_group_size = 5000
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.pipeline.metrics_cache_file, "metrics.parquet");
        assert_eq!(config.pipeline.merged_cache_file, "data.parquet");
        assert_eq!(config.pipeline.loader.stray_separators, "|");
        assert_eq!(config.pipeline.loader.compound_id_delimiter, ':');
        assert_eq!(config.pipeline.loader.users_file, "users.csv");
        assert_eq!(config.pipeline.cache.compression_level, 9);
        assert_eq!(config.pipeline.cache.row_group_size, 5000);
        assert_eq!(config.pipeline.cache.batch_size, 65_536);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_invalid_delimiter() {
        let toml = r#"
            [pipeline.loader]
            compound_id_delimiter = ";;"
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
