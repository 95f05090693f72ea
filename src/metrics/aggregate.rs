use std::collections::{HashMap, HashSet};

use crate::records::DenormalizedExperimentRow;

/// Composite grouping key shared by every aggregation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// User identifier
    pub user_id: i64,
    /// User display name
    pub user_name: String,
}

impl GroupKey {
    fn of(row: &DenormalizedExperimentRow) -> Self {
        Self {
            user_id: row.user_id,
            user_name: row.user_name.clone(),
        }
    }
}

/// Groups in first-appearance order, plus the group index of every row
struct Groups {
    keys: Vec<GroupKey>,
    row_groups: Vec<usize>,
}

impl Groups {
    fn build(rows: &[DenormalizedExperimentRow]) -> Self {
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut keys = Vec::new();
        let mut row_groups = Vec::with_capacity(rows.len());

        for row in rows {
            let key = GroupKey::of(row);
            let group = match index.get(&key) {
                Some(&group) => group,
                None => {
                    let group = keys.len();
                    index.insert(key.clone(), group);
                    keys.push(key);
                    group
                }
            };
            row_groups.push(group);
        }

        Self { keys, row_groups }
    }

    fn zip<T>(self, values: Vec<T>) -> Vec<(GroupKey, T)> {
        self.keys.into_iter().zip(values).collect()
    }
}

/// Count distinct experiments per group
pub fn count_experiments(rows: &[DenormalizedExperimentRow]) -> Vec<(GroupKey, u32)> {
    let groups = Groups::build(rows);
    let mut seen: Vec<HashSet<i64>> = vec![HashSet::new(); groups.keys.len()];

    for (row, &group) in rows.iter().zip(&groups.row_groups) {
        seen[group].insert(row.experiment_id);
    }

    let counts = seen.into_iter().map(|s| s.len() as u32).collect();
    groups.zip(counts)
}

/// Most frequent compound structure per group.
///
/// On a tie the structure encountered first in `rows` wins.
pub fn top_compounds(rows: &[DenormalizedExperimentRow]) -> Vec<(GroupKey, String)> {
    let groups = Groups::build(rows);
    // Per group: structures in first-seen order with their counts
    let mut tallies: Vec<Vec<(&str, usize)>> = vec![Vec::new(); groups.keys.len()];
    let mut positions: Vec<HashMap<&str, usize>> = vec![HashMap::new(); groups.keys.len()];

    for (row, &group) in rows.iter().zip(&groups.row_groups) {
        let structure = row.compound_structure.as_str();
        match positions[group].get(structure) {
            Some(&pos) => tallies[group][pos].1 += 1,
            None => {
                positions[group].insert(structure, tallies[group].len());
                tallies[group].push((structure, 1));
            }
        }
    }

    let modes = tallies
        .into_iter()
        .map(|tally| {
            let mut best: Option<(&str, usize)> = None;
            for (structure, count) in tally {
                match best {
                    Some((_, best_count)) if count <= best_count => {}
                    _ => best = Some((structure, count)),
                }
            }
            best.map(|(structure, _)| structure.to_string())
                .unwrap_or_default()
        })
        .collect();

    groups.zip(modes)
}

/// Mean experiment run time per group, over exploded rows
pub fn mean_run_times(rows: &[DenormalizedExperimentRow]) -> Vec<(GroupKey, f64)> {
    let groups = Groups::build(rows);
    let mut sums: Vec<(f64, usize)> = vec![(0.0, 0); groups.keys.len()];

    for (row, &group) in rows.iter().zip(&groups.row_groups) {
        sums[group].0 += row.experiment_run_time;
        sums[group].1 += 1;
    }

    let means = sums
        .into_iter()
        .map(|(sum, count)| sum / count as f64)
        .collect();
    groups.zip(means)
}
