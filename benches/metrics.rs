use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use compound_metrics::loader::{merge, LoaderConfig};
use compound_metrics::metrics::extract_metrics;
use compound_metrics::records::DenormalizedExperimentRow;

const STRUCTURES: [&str; 6] = ["C21H30O2", "C20H25N3O", "C8H11NO2", "C8H10N4O2", "C17H19NO3", "C9H13N"];

/// Synthetic exploded rows: `num_users` users with 3 compounds per experiment
fn create_rows(num_users: i64, experiments_per_user: i64) -> Vec<DenormalizedExperimentRow> {
    let mut rows = Vec::new();
    for user_id in 0..num_users {
        for e in 0..experiments_per_user {
            let experiment_id = user_id * experiments_per_user + e;
            for c in 0..3 {
                let structure = STRUCTURES[((experiment_id + c) % STRUCTURES.len() as i64) as usize];
                rows.push(DenormalizedExperimentRow {
                    user_id,
                    user_name: format!("user{}", user_id),
                    experiment_id,
                    experiment_run_time: (experiment_id % 97) as f64,
                    compound_id: c,
                    compound_name: structure.to_lowercase(),
                    compound_structure: structure.to_string(),
                });
            }
        }
    }
    rows
}

/// Polluted CSV text for the three raw tables
fn create_raw_tables(num_users: i64, experiments_per_user: i64) -> (String, String, String) {
    let mut compounds = String::from("compound_id,\tcompound_name,\tcompound_structure\n");
    for (i, s) in STRUCTURES.iter().enumerate() {
        compounds.push_str(&format!("{},\tcompound{},\t{}\n", i, i, s));
    }

    let mut users = String::from("user_id,\tname\n");
    for u in 0..num_users {
        users.push_str(&format!("{},\tuser{}\n", u, u));
    }

    let mut experiments =
        String::from("user_id,\texperiment_id,\texperiment_run_time,\texperiment_compound_ids\n");
    for u in 0..num_users {
        for e in 0..experiments_per_user {
            let id = u * experiments_per_user + e;
            experiments.push_str(&format!("{},\t{},\t{},\t{};{};{}\n", u, id, id % 97, id % 6, (id + 1) % 6, (id + 2) % 6));
        }
    }

    (compounds, users, experiments)
}

fn bench_extract_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_metrics");

    for num_users in [100, 1_000, 10_000] {
        let rows = create_rows(num_users, 10);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_users), &rows, |b, rows| {
            b.iter(|| extract_metrics(black_box(rows)))
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let config = LoaderConfig::default();

    for num_users in [100, 1_000] {
        let (compounds, users, experiments) = create_raw_tables(num_users, 10);
        group.throughput(Throughput::Elements((num_users * 10) as u64));
        group.bench_function(BenchmarkId::from_parameter(num_users), |b| {
            b.iter(|| {
                merge(
                    compounds.as_bytes(),
                    users.as_bytes(),
                    experiments.as_bytes(),
                    &config,
                )
                .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_metrics, bench_merge);
criterion_main!(benches);
