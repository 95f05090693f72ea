use arrow::datatypes::{DataType, Schema};

use super::{columns, CacheTable};

/// Required columns and types of a cached table, in schema order
pub fn required_columns(table: CacheTable) -> Vec<(&'static str, DataType)> {
    match table {
        CacheTable::Merged => vec![
            (columns::USER_ID, DataType::Int64),
            (columns::USER_NAME, DataType::Utf8),
            (columns::EXPERIMENT_ID, DataType::Int64),
            (columns::EXPERIMENT_RUN_TIME, DataType::Float64),
            (columns::COMPOUND_ID, DataType::Int64),
            (columns::COMPOUND_NAME, DataType::Utf8),
            (columns::COMPOUND_STRUCTURE, DataType::Utf8),
        ],
        CacheTable::UserMetrics => vec![
            (columns::USER_ID, DataType::Int64),
            (columns::USER_NAME, DataType::Utf8),
            (columns::N_EXPERIMENTS, DataType::UInt32),
            (columns::TOP_COMPOUND, DataType::Utf8),
            (columns::MEAN_EXPERIMENT_RUN_TIME, DataType::Float64),
        ],
    }
}

/// Whether a stored column of type `found` can be read as `expected`.
///
/// Files written by other tools may use wider string encodings or narrower
/// integers; those are cast on load. Integers read as `Float64` run times are
/// accepted as well.
pub fn is_compatible_type(expected: &DataType, found: &DataType) -> bool {
    if expected == found {
        return true;
    }
    match expected {
        DataType::Utf8 => matches!(found, DataType::LargeUtf8 | DataType::Utf8View),
        DataType::Int64 | DataType::UInt32 => found.is_integer(),
        DataType::Float64 => found.is_floating() || found.is_integer(),
        _ => false,
    }
}

/// Validates that a schema can be read back as the given cached table.
///
/// Extra columns are allowed; every required column must be present with the
/// expected type or one compatible with it (see [`is_compatible_type`]).
pub fn validate_schema(schema: &Schema, table: CacheTable) -> Result<(), SchemaValidationError> {
    for (name, expected_type) in required_columns(table) {
        match schema.field_with_name(name) {
            Ok(field) => {
                if !is_compatible_type(&expected_type, field.data_type()) {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.to_string(),
                        expected: format!("{:?}", expected_type),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.to_string()));
            }
        }
    }

    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
