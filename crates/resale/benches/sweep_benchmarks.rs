//! Prediction and sweep benchmarks.
//!
//! Measures a single prediction and holding-period sweeps of various widths
//! against generated decision trees.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use resale::model::{TreeArtifact, TreeNode};
use resale::{
    DecisionTreeRegressor, FEATURE_NAMES, PropertyInputs, build_and_predict, sweep_years_holding,
};

/// Generate a complete binary tree of the given depth, stored breadth-first.
fn generate_tree(depth: u32) -> DecisionTreeRegressor {
    let internal = (1usize << depth) - 1;
    let total = (1usize << (depth + 1)) - 1;

    let nodes = (0..total)
        .map(|index| {
            if index < internal {
                let feature = index % FEATURE_NAMES.len();
                TreeNode::Split {
                    feature,
                    threshold: 10.0 * (index % 7) as f64,
                    left: 2 * index + 1,
                    right: 2 * index + 2,
                }
            } else {
                TreeNode::Leaf {
                    value: 200_000.0 + 1_000.0 * index as f64,
                }
            }
        })
        .collect();

    let artifact = TreeArtifact {
        name: format!("bench-depth-{depth}"),
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        nodes,
    };
    DecisionTreeRegressor::from_artifact(artifact).unwrap()
}

/// Benchmark a single prediction at various tree depths.
fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    let inputs = PropertyInputs::default();

    for depth in [4, 8, 12].iter() {
        let model = generate_tree(*depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &model, |b, model| {
            b.iter(|| black_box(build_and_predict(model, black_box(&inputs)).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark sweeps of various widths.
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_years_holding");
    let inputs = PropertyInputs::default();
    let model = generate_tree(10);

    for max_years in [10u32, 30, 60].iter() {
        group.throughput(Throughput::Elements(u64::from(*max_years) + 1));
        group.bench_with_input(
            BenchmarkId::new("years", max_years),
            max_years,
            |b, max_years| {
                b.iter(|| black_box(sweep_years_holding(&model, &inputs, 0, *max_years).unwrap()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_predict, bench_sweep);
criterion_main!(benches);
