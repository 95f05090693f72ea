use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{CACHE_FORMAT_VERSION, KEY_FORMAT_VERSION, KEY_TABLE};
use super::CacheTable;

/// Creates a Field with a short human-readable description attached
fn field_with_description(name: &str, data_type: DataType, description: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert("description".to_string(), description.to_string());
    Field::new(name, data_type, false).with_metadata(metadata)
}

fn with_table_metadata(builder: SchemaBuilder, table: CacheTable) -> Schema {
    let mut metadata = HashMap::new();
    metadata.insert(KEY_FORMAT_VERSION.to_string(), CACHE_FORMAT_VERSION.to_string());
    metadata.insert(KEY_TABLE.to_string(), table.tag().to_string());
    builder.finish().with_metadata(metadata)
}

/// Creates the Arrow schema of the merged-data cache.
///
/// Every column is required; one row per (experiment, compound) reference.
///
/// # Example
///
/// ```
/// use compound_metrics::schema::create_merged_schema;
///
/// let schema = create_merged_schema();
/// assert_eq!(schema.fields().len(), 7);
/// ```
pub fn create_merged_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(field_with_description(
        columns::USER_ID,
        DataType::Int64,
        "user identifier",
    ));
    builder.push(field_with_description(
        columns::USER_NAME,
        DataType::Utf8,
        "user display name",
    ));
    builder.push(field_with_description(
        columns::EXPERIMENT_ID,
        DataType::Int64,
        "experiment identifier",
    ));
    builder.push(field_with_description(
        columns::EXPERIMENT_RUN_TIME,
        DataType::Float64,
        "experiment run time, repeated per referenced compound",
    ));
    builder.push(field_with_description(
        columns::COMPOUND_ID,
        DataType::Int64,
        "compound identifier",
    ));
    builder.push(field_with_description(
        columns::COMPOUND_NAME,
        DataType::Utf8,
        "compound name",
    ));
    builder.push(field_with_description(
        columns::COMPOUND_STRUCTURE,
        DataType::Utf8,
        "compound molecular formula",
    ));

    with_table_metadata(builder, CacheTable::Merged)
}

/// Returns an Arc-wrapped merged schema for shared ownership
pub fn create_merged_schema_arc() -> Arc<Schema> {
    Arc::new(create_merged_schema())
}

/// Creates the Arrow schema of the user metrics cache.
///
/// # Schema Columns
///
/// | Column | Type | Description |
/// |--------|------|-------------|
/// | user_id | Int64 | User identifier |
/// | user_name | Utf8 | User display name |
/// | n_experiments | UInt32 | Distinct experiments |
/// | top_compound | Utf8 | Most frequent compound structure |
/// | mean_experiment_run_time | Float64 | Mean run time over exploded rows |
///
/// # Example
///
/// ```
/// use compound_metrics::schema::create_metrics_schema;
///
/// let schema = create_metrics_schema();
/// assert_eq!(schema.fields().len(), 5);
/// ```
pub fn create_metrics_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(field_with_description(
        columns::USER_ID,
        DataType::Int64,
        "user identifier",
    ));
    builder.push(field_with_description(
        columns::USER_NAME,
        DataType::Utf8,
        "user display name",
    ));
    builder.push(field_with_description(
        columns::N_EXPERIMENTS,
        DataType::UInt32,
        "count of distinct experiments",
    ));
    builder.push(field_with_description(
        columns::TOP_COMPOUND,
        DataType::Utf8,
        "most frequent compound structure, ties by first occurrence",
    ));
    builder.push(field_with_description(
        columns::MEAN_EXPERIMENT_RUN_TIME,
        DataType::Float64,
        "mean run time over exploded rows",
    ));

    with_table_metadata(builder, CacheTable::UserMetrics)
}

/// Returns an Arc-wrapped metrics schema for shared ownership
pub fn create_metrics_schema_arc() -> Arc<Schema> {
    Arc::new(create_metrics_schema())
}
