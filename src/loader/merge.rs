use std::collections::HashMap;

use log::debug;

use super::LoadError;
use crate::records::{CompoundRecord, DenormalizedExperimentRow, ExperimentRecord, UserRecord};

/// Join experiments to users, explode compound lists and resolve compounds.
///
/// Experiments whose user is absent from `users` are dropped. Every compound
/// id referenced by a kept experiment must exist in `compounds`; the first
/// miss aborts the merge. When a compound id appears twice in `compounds`, the
/// later row wins.
///
/// Output order follows `experiments`, then each experiment's compound list.
pub fn merge_records(
    compounds: &[CompoundRecord],
    users: &[UserRecord],
    experiments: &[ExperimentRecord],
) -> Result<Vec<DenormalizedExperimentRow>, LoadError> {
    let mut compound_lookup: HashMap<i64, &CompoundRecord> = HashMap::with_capacity(compounds.len());
    for compound in compounds {
        compound_lookup.insert(compound.compound_id, compound);
    }

    // A user id may repeat; an inner join then yields one match per user row.
    let mut user_lookup: HashMap<i64, Vec<&str>> = HashMap::with_capacity(users.len());
    for user in users {
        user_lookup
            .entry(user.user_id)
            .or_default()
            .push(user.user_name.as_str());
    }

    let capacity = experiments.iter().map(|e| e.compound_ids.len()).sum();
    let mut rows = Vec::with_capacity(capacity);
    let mut dropped = 0usize;

    for experiment in experiments {
        let Some(user_names) = user_lookup.get(&experiment.user_id) else {
            dropped += 1;
            continue;
        };

        for user_name in user_names {
            for &compound_id in &experiment.compound_ids {
                let compound = compound_lookup.get(&compound_id).ok_or(
                    LoadError::UnresolvedReference {
                        compound_id,
                        experiment_id: experiment.experiment_id,
                    },
                )?;

                rows.push(DenormalizedExperimentRow {
                    user_id: experiment.user_id,
                    user_name: (*user_name).to_string(),
                    experiment_id: experiment.experiment_id,
                    experiment_run_time: experiment.experiment_run_time,
                    compound_id,
                    compound_name: compound.compound_name.clone(),
                    compound_structure: compound.compound_structure.clone(),
                });
            }
        }
    }

    if dropped > 0 {
        debug!("Dropped {} experiments with no matching user", dropped);
    }

    Ok(rows)
}
