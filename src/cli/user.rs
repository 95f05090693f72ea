use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use compound_metrics::pipeline::Pipeline;

/// Print the metrics of one user, failing when the user is unknown
pub fn run(pipeline: &Pipeline, directory: PathBuf, user_id: i64) -> Result<()> {
    info!("Looking up user '{}' in {}", user_id, directory.display());

    let features = pipeline
        .lookup_user(&directory, user_id)
        .with_context(|| format!("Lookup in {} failed", directory.display()))?;

    println!("{}", serde_json::to_string_pretty(&features)?);
    Ok(())
}
