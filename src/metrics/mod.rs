//! # Metrics Extractor
//!
//! Aggregates the denormalized experiment table into one row per user.
//!
//! Three independent aggregations are grouped by `(user_id, user_name)` and
//! then joined on that key:
//!
//! - [`count_experiments`]: distinct `experiment_id` values
//! - [`top_compounds`]: most frequent `compound_structure`, ties resolved by
//!   first occurrence in row order
//! - [`mean_run_times`]: arithmetic mean of `experiment_run_time`
//!
//! All three operate on exploded rows: an experiment that references `k`
//! compounds contributes its run time `k` times to the mean, and each of its
//! compounds once to the mode. Output rows are ordered by the first appearance
//! of their user in the input.

mod aggregate;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use log::debug;

pub use aggregate::{count_experiments, mean_run_times, top_compounds, GroupKey};

use crate::records::{DenormalizedExperimentRow, UserFeatures, UserMetricsRow};

/// Derive per-user metrics from the denormalized table
pub fn extract_metrics(rows: &[DenormalizedExperimentRow]) -> Vec<UserMetricsRow> {
    let n_experiments = count_experiments(rows);
    let top = top_compounds(rows);
    let run_times = mean_run_times(rows);

    let top: HashMap<&GroupKey, &String> = top.iter().map(|(k, v)| (k, v)).collect();
    let run_times: HashMap<&GroupKey, f64> = run_times.iter().map(|(k, v)| (k, *v)).collect();

    // Inner join on the group key; the aggregations share their grouping so no
    // group is lost here.
    let metrics: Vec<UserMetricsRow> = n_experiments
        .iter()
        .filter_map(|(key, n)| {
            let top_compound = top.get(key)?;
            let mean = run_times.get(key)?;
            Some(UserMetricsRow {
                user_id: key.user_id,
                user_name: key.user_name.clone(),
                n_experiments: *n,
                top_compound: (*top_compound).clone(),
                mean_experiment_run_time: *mean,
            })
        })
        .collect();

    debug!(
        "Extracted metrics for {} users from {} rows",
        metrics.len(),
        rows.len()
    );
    metrics
}

/// Find the metrics of `user_id`, if present
pub fn find_user(metrics: &[UserMetricsRow], user_id: i64) -> Option<UserFeatures> {
    metrics
        .iter()
        .find(|row| row.user_id == user_id)
        .map(UserMetricsRow::features)
}
