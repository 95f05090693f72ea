use super::*;
use arrow::datatypes::{DataType, Field, Schema};

#[test]
fn test_merged_schema_creation() {
    let schema = create_merged_schema();
    assert_eq!(schema.fields().len(), 7);

    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec![
            USER_ID,
            USER_NAME,
            EXPERIMENT_ID,
            EXPERIMENT_RUN_TIME,
            COMPOUND_ID,
            COMPOUND_NAME,
            COMPOUND_STRUCTURE
        ]
    );
    assert!(schema.fields().iter().all(|f| !f.is_nullable()));
}

#[test]
fn test_metrics_schema_column_order() {
    let schema = create_metrics_schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec![
            "user_id",
            "user_name",
            "n_experiments",
            "top_compound",
            "mean_experiment_run_time"
        ]
    );
}

#[test]
fn test_schema_metadata_tags() {
    let merged = create_merged_schema();
    assert_eq!(merged.metadata().get(KEY_TABLE).unwrap(), "merged");
    assert_eq!(
        merged.metadata().get(KEY_FORMAT_VERSION).unwrap(),
        CACHE_FORMAT_VERSION
    );

    let metrics = create_metrics_schema();
    assert_eq!(metrics.metadata().get(KEY_TABLE).unwrap(), "user_metrics");
}

#[test]
fn test_schema_validation() {
    assert!(validate_schema(&create_merged_schema(), CacheTable::Merged).is_ok());
    assert!(validate_schema(&create_metrics_schema(), CacheTable::UserMetrics).is_ok());
}

#[test]
fn test_schema_validation_wrong_table() {
    let result = validate_schema(&create_metrics_schema(), CacheTable::Merged);
    assert!(matches!(result, Err(SchemaValidationError::MissingColumn(_))));
}

#[test]
fn test_schema_validation_type_mismatch() {
    let schema = Schema::new(vec![
        Field::new(USER_ID, DataType::Utf8, false),
        Field::new(USER_NAME, DataType::Utf8, false),
        Field::new(N_EXPERIMENTS, DataType::UInt32, false),
        Field::new(TOP_COMPOUND, DataType::Utf8, false),
        Field::new(MEAN_EXPERIMENT_RUN_TIME, DataType::Float64, false),
    ]);

    match validate_schema(&schema, CacheTable::UserMetrics) {
        Err(SchemaValidationError::TypeMismatch { column, .. }) => assert_eq!(column, USER_ID),
        other => panic!("expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_table_tag_roundtrip() {
    for table in [CacheTable::Merged, CacheTable::UserMetrics] {
        assert_eq!(CacheTable::from_tag(table.tag()), Some(table));
    }
    assert_eq!(CacheTable::from_tag("peaks"), None);
}

#[test]
fn test_compatible_types() {
    assert!(is_compatible_type(&DataType::Utf8, &DataType::LargeUtf8));
    assert!(is_compatible_type(&DataType::Utf8, &DataType::Utf8View));
    assert!(is_compatible_type(&DataType::Int64, &DataType::Int32));
    assert!(is_compatible_type(&DataType::UInt32, &DataType::Int64));
    assert!(is_compatible_type(&DataType::Float64, &DataType::Int64));
    assert!(is_compatible_type(&DataType::Float64, &DataType::Float32));

    assert!(!is_compatible_type(&DataType::Int64, &DataType::Utf8));
    assert!(!is_compatible_type(&DataType::Int64, &DataType::Float64));
    assert!(!is_compatible_type(&DataType::Utf8, &DataType::Int64));
}

#[test]
fn test_schema_validation_accepts_polars_style_types() {
    let schema = Schema::new(vec![
        Field::new(USER_ID, DataType::Int64, true),
        Field::new(USER_NAME, DataType::LargeUtf8, true),
        Field::new(EXPERIMENT_ID, DataType::Int64, true),
        Field::new(EXPERIMENT_RUN_TIME, DataType::Int64, true),
        Field::new(COMPOUND_ID, DataType::Int32, true),
        Field::new(COMPOUND_NAME, DataType::LargeUtf8, true),
        Field::new(COMPOUND_STRUCTURE, DataType::LargeUtf8, true),
    ]);
    assert!(validate_schema(&schema, CacheTable::Merged).is_ok());
}
