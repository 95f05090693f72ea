use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray, UInt32Array};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use parquet::arrow::ArrowWriter;
use tempfile::NamedTempFile;
use uuid::Uuid;

use super::{CacheConfig, CacheError};
use crate::records::{DenormalizedExperimentRow, UserMetricsRow};
use crate::schema::{
    create_merged_schema_arc, create_metrics_schema_arc, CacheTable, CACHE_FORMAT_VERSION,
    KEY_CREATED_AT, KEY_FORMAT_VERSION, KEY_RUN_ID, KEY_TABLE, KEY_WRITER_INFO,
};

/// Provenance written into the footer of every cache file of one pipeline run
#[derive(Debug, Clone)]
pub struct CacheFooter {
    /// Identifier shared by the files written by the same run
    pub run_id: Uuid,
    /// Time the run started writing
    pub created_at: DateTime<Utc>,
}

impl CacheFooter {
    /// Footer for a new run
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn to_key_values(&self, table: CacheTable) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        metadata.insert(KEY_FORMAT_VERSION.to_string(), CACHE_FORMAT_VERSION.to_string());
        metadata.insert(KEY_TABLE.to_string(), table.tag().to_string());
        metadata.insert(
            KEY_CREATED_AT.to_string(),
            self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        metadata.insert(KEY_RUN_ID.to_string(), self.run_id.to_string());
        metadata.insert(
            KEY_WRITER_INFO.to_string(),
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        );
        metadata
    }
}

impl Default for CacheFooter {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics from a completed cache write
#[derive(Debug, Clone)]
pub struct CacheWriteStats {
    /// Table that was written
    pub table: CacheTable,
    /// Final location of the file
    pub path: PathBuf,
    /// Number of rows written
    pub rows_written: usize,
    /// Number of row groups in the file
    pub row_groups_written: usize,
    /// Size of the file on disk
    pub file_size_bytes: u64,
}

impl fmt::Display for CacheWriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} {} rows in {} row groups to {} ({} bytes)",
            self.rows_written,
            self.table,
            self.row_groups_written,
            self.path.display(),
            self.file_size_bytes
        )
    }
}

fn merged_batch(schema: Arc<Schema>, rows: &[DenormalizedExperimentRow]) -> Result<RecordBatch, CacheError> {
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.user_id))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.user_name.as_str()))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.experiment_id))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.experiment_run_time))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.compound_id))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.compound_name.as_str()))),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.compound_structure.as_str()),
        )),
    ];
    Ok(RecordBatch::try_new(schema, arrays)?)
}

fn metrics_batch(schema: Arc<Schema>, rows: &[UserMetricsRow]) -> Result<RecordBatch, CacheError> {
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.user_id))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.user_name.as_str()))),
        Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.n_experiments))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.top_compound.as_str()))),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.mean_experiment_run_time),
        )),
    ];
    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Write `batch` to `path` through a temporary file in the same directory.
///
/// The temporary file is renamed over `path` only after the Parquet footer
/// has been written and synced, so readers never observe a partial file. If
/// anything fails the temporary file is removed and `path` is left as it was.
fn write_atomic(
    path: &Path,
    table: CacheTable,
    batch: &RecordBatch,
    config: &CacheConfig,
    footer: &CacheFooter,
) -> Result<CacheWriteStats, CacheError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(directory)?;
    let props = config.to_writer_properties(&footer.to_key_values(table));
    let mut writer = ArrowWriter::try_new(temp_file.reopen()?, batch.schema(), Some(props))?;

    if batch.num_rows() > 0 {
        writer.write(batch)?;
    }
    let file_metadata = writer.close()?;
    temp_file.as_file().sync_all()?;

    temp_file
        .persist(path)
        .map_err(|e| CacheError::IoError(e.error))?;

    let stats = CacheWriteStats {
        table,
        path: path.to_path_buf(),
        rows_written: batch.num_rows(),
        row_groups_written: file_metadata.row_groups.len(),
        file_size_bytes: std::fs::metadata(path)?.len(),
    };
    debug!("{}", stats);
    Ok(stats)
}

/// Persist the denormalized table as the merged-data cache
pub fn write_merged(
    path: &Path,
    rows: &[DenormalizedExperimentRow],
    config: &CacheConfig,
    footer: &CacheFooter,
) -> Result<CacheWriteStats, CacheError> {
    let batch = merged_batch(create_merged_schema_arc(), rows)?;
    write_atomic(path, CacheTable::Merged, &batch, config, footer)
}

/// Persist the per-user metrics as the final-metrics cache
pub fn write_metrics(
    path: &Path,
    rows: &[UserMetricsRow],
    config: &CacheConfig,
    footer: &CacheFooter,
) -> Result<CacheWriteStats, CacheError> {
    let batch = metrics_batch(create_metrics_schema_arc(), rows)?;
    write_atomic(path, CacheTable::UserMetrics, &batch, config, footer)
}
