use std::path::PathBuf;

/// Errors that can occur while loading and merging the raw tables
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A required input file is absent from the directory
    #[error("Missing input file: {}", path.display())]
    MissingInput {
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// An experiment references a compound absent from the compound table
    #[error("Experiment {experiment_id} references unknown compound {compound_id}")]
    UnresolvedReference {
        /// The compound id that could not be resolved
        compound_id: i64,
        /// The experiment holding the reference
        experiment_id: i64,
    },

    /// A field could not be coerced to its expected type
    #[error("Malformed row in {file} at line {line}: {message}")]
    MalformedRow {
        /// Source table name
        file: String,
        /// 1-based line number in the cleaned source
        line: u64,
        /// What went wrong
        message: String,
    },

    /// A required column is missing from the header
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn {
        /// Source table name
        file: String,
        /// Column that was expected
        column: String,
    },

    /// I/O error reading an input file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}
