use super::*;
use proptest::prelude::*;

fn row(
    user_id: i64,
    user_name: &str,
    experiment_id: i64,
    run_time: f64,
    structure: &str,
) -> DenormalizedExperimentRow {
    DenormalizedExperimentRow {
        user_id,
        user_name: user_name.to_string(),
        experiment_id,
        experiment_run_time: run_time,
        compound_id: 0,
        compound_name: format!("name of {}", structure),
        compound_structure: structure.to_string(),
    }
}

/// Alice tested C20H25N3O once, C21H30O2 twice and C8H11NO2 once
fn alice_rows() -> Vec<DenormalizedExperimentRow> {
    vec![
        row(1, "Alice", 1, 10.0, "C21H30O2"),
        row(1, "Alice", 1, 10.0, "C20H25N3O"),
        row(1, "Alice", 2, 15.0, "C21H30O2"),
        row(1, "Alice", 2, 15.0, "C8H11NO2"),
    ]
}

#[test]
fn test_alice_metrics() {
    let metrics = extract_metrics(&alice_rows());
    assert_eq!(
        metrics,
        vec![UserMetricsRow {
            user_id: 1,
            user_name: "Alice".to_string(),
            n_experiments: 2,
            top_compound: "C21H30O2".to_string(),
            mean_experiment_run_time: (10.0 + 15.0) / 2.0,
        }]
    );
}

#[test]
fn test_mean_counts_exploded_rows() {
    // One experiment with three compounds, one with a single compound
    let rows = vec![
        row(1, "Alice", 1, 30.0, "A"),
        row(1, "Alice", 1, 30.0, "B"),
        row(1, "Alice", 1, 30.0, "C"),
        row(1, "Alice", 2, 10.0, "A"),
    ];

    let metrics = extract_metrics(&rows);
    assert_eq!(metrics[0].mean_experiment_run_time, 25.0);
    assert_eq!(metrics[0].n_experiments, 2);
}

#[test]
fn test_mode_tie_breaks_by_first_occurrence() {
    let rows = vec![
        row(2, "Bob", 3, 5.0, "C8H11NO2"),
        row(2, "Bob", 3, 5.0, "C21H30O2"),
        row(2, "Bob", 4, 7.0, "C8H10N4O2"),
    ];
    assert_eq!(extract_metrics(&rows)[0].top_compound, "C8H11NO2");

    let reversed: Vec<_> = rows.into_iter().rev().collect();
    assert_eq!(extract_metrics(&reversed)[0].top_compound, "C8H10N4O2");
}

#[test]
fn test_later_structure_wins_only_when_strictly_more_frequent() {
    let rows = vec![
        row(1, "Alice", 1, 1.0, "A"),
        row(1, "Alice", 2, 1.0, "B"),
        row(1, "Alice", 3, 1.0, "B"),
        row(1, "Alice", 4, 1.0, "A"),
        row(1, "Alice", 5, 1.0, "B"),
    ];
    assert_eq!(extract_metrics(&rows)[0].top_compound, "B");
}

#[test]
fn test_users_ordered_by_first_appearance() {
    let rows = vec![
        row(5, "Eve", 1, 1.0, "A"),
        row(2, "Bob", 2, 1.0, "A"),
        row(5, "Eve", 3, 1.0, "A"),
        row(1, "Alice", 4, 1.0, "A"),
    ];
    let ids: Vec<i64> = extract_metrics(&rows).iter().map(|m| m.user_id).collect();
    assert_eq!(ids, vec![5, 2, 1]);
}

#[test]
fn test_group_key_includes_user_name() {
    let rows = vec![row(1, "Alice", 1, 1.0, "A"), row(1, "Alicia", 2, 3.0, "B")];
    let metrics = extract_metrics(&rows);
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[1].user_name, "Alicia");
    assert_eq!(metrics[1].mean_experiment_run_time, 3.0);
}

#[test]
fn test_empty_input() {
    assert!(extract_metrics(&[]).is_empty());
}

#[test]
fn test_aggregations_share_grouping() {
    let rows = alice_rows();
    let counts = count_experiments(&rows);
    let tops = top_compounds(&rows);
    let means = mean_run_times(&rows);

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].0, tops[0].0);
    assert_eq!(tops[0].0, means[0].0);
}

#[test]
fn test_find_user() {
    let metrics = extract_metrics(&alice_rows());
    let features = find_user(&metrics, 1).unwrap();
    assert_eq!(features.top_compound, "C21H30O2");
    assert!(find_user(&metrics, 2).is_none());
}

proptest! {
    /// Every user in the input appears exactly once in the output
    #[test]
    fn prop_one_row_per_user(
        users in prop::collection::vec((0i64..5, 0i64..20, 0.0f64..100.0, 0usize..4), 1..60)
    ) {
        let structures = ["A", "B", "C", "D"];
        let rows: Vec<_> = users
            .iter()
            .map(|(user, exp, rt, s)| row(*user, &format!("user{}", user), *exp, *rt, structures[*s]))
            .collect();

        let metrics = extract_metrics(&rows);
        let mut expected: Vec<i64> = rows.iter().map(|r| r.user_id).collect();
        expected.sort_unstable();
        expected.dedup();
        let mut found: Vec<i64> = metrics.iter().map(|m| m.user_id).collect();
        found.sort_unstable();
        prop_assert_eq!(found, expected);
    }

    /// The mean is taken over exploded rows, not distinct experiments
    #[test]
    fn prop_mean_over_exploded_rows(
        experiments in prop::collection::vec((1.0f64..100.0, 1usize..5), 1..20)
    ) {
        let mut rows = Vec::new();
        for (exp_id, (rt, k)) in experiments.iter().enumerate() {
            for c in 0..*k {
                rows.push(row(1, "Alice", exp_id as i64, *rt, &format!("S{}", c)));
            }
        }

        let expected = rows.iter().map(|r| r.experiment_run_time).sum::<f64>() / rows.len() as f64;
        let metrics = extract_metrics(&rows);
        prop_assert_eq!(metrics.len(), 1);
        prop_assert!((metrics[0].mean_experiment_run_time - expected).abs() < 1e-9);
        prop_assert_eq!(metrics[0].n_experiments as usize, experiments.len());
    }

    /// The mode is at least as frequent as any other structure and, among equals, first seen
    #[test]
    fn prop_mode_is_first_most_frequent(picks in prop::collection::vec(0usize..4, 1..40)) {
        let structures = ["A", "B", "C", "D"];
        let rows: Vec<_> = picks
            .iter()
            .enumerate()
            .map(|(i, s)| row(1, "Alice", i as i64, 1.0, structures[*s]))
            .collect();

        let top = extract_metrics(&rows)[0].top_compound.clone();
        let count = |s: &str| rows.iter().filter(|r| r.compound_structure == s).count();
        let max = structures.iter().map(|s| count(*s)).max().unwrap();
        prop_assert_eq!(count(top.as_str()), max);

        let first_max = rows
            .iter()
            .map(|r| r.compound_structure.as_str())
            .find(|s| count(*s) == max)
            .unwrap();
        prop_assert_eq!(top.as_str(), first_max);
    }
}
