use crate::schema::SchemaValidationError;

/// Errors that can occur while reading or writing cache files
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Cached schema does not match the expected table
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaValidationError),

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Invalid file content
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
