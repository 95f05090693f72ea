use anyhow::{Context, Result};
use std::path::PathBuf;

use compound_metrics::cache::read_cache_info;

/// Display information about a cache file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let info = read_cache_info(&file).context("Failed to read Parquet file")?;
    let or_unknown = |value: &Option<String>| value.clone().unwrap_or_else(|| "<unknown>".to_string());

    println!("Cache File Information");
    println!("======================");
    println!("File: {}", file.display());
    println!();

    println!("Footer:");
    println!(
        "  Table: {}",
        info.table
            .map(|t| t.to_string())
            .unwrap_or_else(|| "<untagged>".to_string())
    );
    println!("  Format version: {}", or_unknown(&info.format_version));
    println!("  Run ID: {}", or_unknown(&info.run_id));
    println!("  Created at: {}", or_unknown(&info.created_at));
    println!();

    println!("File Statistics:");
    println!("  Row groups: {}", info.num_row_groups);
    println!("  Total rows: {}", info.num_rows);
    println!();

    println!("Schema:");
    for (i, column) in info.columns.iter().enumerate() {
        println!("  {:3}. {}", i + 1, column);
    }

    Ok(())
}
