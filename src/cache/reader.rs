use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::metadata::ParquetMetaData;

use super::utils::{get_float64_column, get_int64_column, get_string_column, get_uint32_column};
use super::{CacheConfig, CacheError};
use crate::records::{DenormalizedExperimentRow, UserMetricsRow};
use crate::schema::{
    columns, validate_schema, CacheTable, KEY_CREATED_AT, KEY_FORMAT_VERSION, KEY_RUN_ID,
    KEY_TABLE,
};

/// Summary of a cache file, read from its Parquet footer
#[derive(Debug, Clone)]
pub struct CacheFileInfo {
    /// Table tag, if the file carries one
    pub table: Option<CacheTable>,
    /// Cache format version
    pub format_version: Option<String>,
    /// Identifier of the run that wrote the file
    pub run_id: Option<String>,
    /// Write timestamp (RFC 3339)
    pub created_at: Option<String>,
    /// Total number of rows
    pub num_rows: i64,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Column names in schema order
    pub columns: Vec<String>,
}

fn footer_value(metadata: &ParquetMetaData, key: &str) -> Option<String> {
    metadata
        .file_metadata()
        .key_value_metadata()?
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.clone())
}

/// Read the footer summary of a cache file
pub fn read_cache_info(path: &Path) -> Result<CacheFileInfo, CacheError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;
    let metadata = builder.metadata();

    Ok(CacheFileInfo {
        table: footer_value(metadata, KEY_TABLE).and_then(|tag| CacheTable::from_tag(&tag)),
        format_version: footer_value(metadata, KEY_FORMAT_VERSION),
        run_id: footer_value(metadata, KEY_RUN_ID),
        created_at: footer_value(metadata, KEY_CREATED_AT),
        num_rows: metadata.file_metadata().num_rows(),
        num_row_groups: metadata.num_row_groups(),
        columns: builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect(),
    })
}

/// Open a cache file as `table` and collect its record batches.
///
/// A footer tagged with a different table is rejected; an untagged file is
/// accepted as long as its schema carries the required columns.
fn read_batches(
    path: &Path,
    table: CacheTable,
    config: &CacheConfig,
) -> Result<Vec<RecordBatch>, CacheError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;

    if let Some(tag) = footer_value(builder.metadata(), KEY_TABLE) {
        if tag != table.tag() {
            return Err(CacheError::InvalidFormat(format!(
                "{} holds the '{}' table, expected '{}'",
                path.display(),
                tag,
                table
            )));
        }
    }
    validate_schema(builder.schema(), table)?;

    let reader = builder.with_batch_size(config.batch_size.max(1)).build()?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} batches of {} from {}", batches.len(), table, path.display());
    Ok(batches)
}

/// Load the merged-data cache
pub fn read_merged(
    path: &Path,
    config: &CacheConfig,
) -> Result<Vec<DenormalizedExperimentRow>, CacheError> {
    let mut rows = Vec::new();

    for batch in read_batches(path, CacheTable::Merged, config)? {
        let user_ids = get_int64_column(&batch, columns::USER_ID)?;
        let user_names = get_string_column(&batch, columns::USER_NAME)?;
        let experiment_ids = get_int64_column(&batch, columns::EXPERIMENT_ID)?;
        let run_times = get_float64_column(&batch, columns::EXPERIMENT_RUN_TIME)?;
        let compound_ids = get_int64_column(&batch, columns::COMPOUND_ID)?;
        let compound_names = get_string_column(&batch, columns::COMPOUND_NAME)?;
        let structures = get_string_column(&batch, columns::COMPOUND_STRUCTURE)?;

        rows.reserve(batch.num_rows());
        for i in 0..batch.num_rows() {
            rows.push(DenormalizedExperimentRow {
                user_id: user_ids.value(i),
                user_name: user_names.value(i).to_string(),
                experiment_id: experiment_ids.value(i),
                experiment_run_time: run_times.value(i),
                compound_id: compound_ids.value(i),
                compound_name: compound_names.value(i).to_string(),
                compound_structure: structures.value(i).to_string(),
            });
        }
    }

    Ok(rows)
}

/// Load the final-metrics cache
pub fn read_metrics(path: &Path, config: &CacheConfig) -> Result<Vec<UserMetricsRow>, CacheError> {
    let mut rows = Vec::new();

    for batch in read_batches(path, CacheTable::UserMetrics, config)? {
        let user_ids = get_int64_column(&batch, columns::USER_ID)?;
        let user_names = get_string_column(&batch, columns::USER_NAME)?;
        let n_experiments = get_uint32_column(&batch, columns::N_EXPERIMENTS)?;
        let top_compounds = get_string_column(&batch, columns::TOP_COMPOUND)?;
        let mean_run_times = get_float64_column(&batch, columns::MEAN_EXPERIMENT_RUN_TIME)?;

        rows.reserve(batch.num_rows());
        for i in 0..batch.num_rows() {
            rows.push(UserMetricsRow {
                user_id: user_ids.value(i),
                user_name: user_names.value(i).to_string(),
                n_experiments: n_experiments.value(i),
                top_compound: top_compounds.value(i).to_string(),
                mean_experiment_run_time: mean_run_times.value(i),
            });
        }
    }

    Ok(rows)
}
