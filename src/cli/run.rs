use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use compound_metrics::pipeline::Pipeline;
use compound_metrics::records::UserMetricsRow;

const HEADER: [&str; 5] = [
    "user_id",
    "user_name",
    "n_experiments",
    "top_compound",
    "mean_experiment_run_time",
];

/// Run the pipeline on a directory and print the metrics
pub fn run(pipeline: &Pipeline, directory: PathBuf, json: bool) -> Result<()> {
    if !directory.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", directory.display());
    }

    let report = pipeline
        .run_with_report(&directory)
        .with_context(|| format!("Processing {} failed", directory.display()))?;

    info!("Served {} users from {}", report.metrics.len(), report.source);
    for path in &report.files_written {
        info!("Wrote {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.metrics)?);
    } else {
        print_table(&report.metrics);
    }

    Ok(())
}

fn print_table(rows: &[UserMetricsRow]) {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.user_id.to_string(),
                row.user_name.clone(),
                row.n_experiments.to_string(),
                row.top_compound.clone(),
                format!("{:.3}", row.mean_experiment_run_time),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let header = HEADER
        .iter()
        .zip(widths.iter())
        .map(|(name, width)| format!("{:<width$}", name, width = *width))
        .collect::<Vec<_>>()
        .join("  ");

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", console::style(&header).bold().cyan());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", header);
    }

    for row in &cells {
        let line = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}
