/// Cache file format version - follows semantic versioning
pub const CACHE_FORMAT_VERSION: &str = "1.0.0";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "compound_metrics:format_version";

/// Metadata key naming the cached table (`merged` or `user_metrics`)
pub const KEY_TABLE: &str = "compound_metrics:table";

/// Metadata key for the time the cache file was written
pub const KEY_CREATED_AT: &str = "compound_metrics:created_at";

/// Metadata key for the identifier of the pipeline run that wrote the file
pub const KEY_RUN_ID: &str = "compound_metrics:run_id";

/// Software identifier written alongside the other footer keys
pub const KEY_WRITER_INFO: &str = "compound_metrics:writer_info";
