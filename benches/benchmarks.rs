use chain_bp::ChainMRF;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_chain(n_nodes: usize) -> ChainMRF {
    let labels: Vec<String> = (0..n_nodes).map(|i| format!("w{i}")).collect();

    // NB deterministic priors cycling through (0.1, 0.9).
    let priors: Vec<f64> = (0..n_nodes).map(|i| 0.1 + 0.8 * ((i % 5) as f64 / 4.0)).collect();

    ChainMRF::new(labels, &priors, [[0.7, 0.3], [0.3, 0.7]]).unwrap()
}

fn bench_bp(c: &mut Criterion) {
    let mut group = c.benchmark_group("BeliefPropagation");

    for size in [10, 100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::new("Chain", size), size, |b, &size| {
            b.iter_batched(
                || build_chain(size),
                |mrf| black_box(mrf.beliefs().unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bp);
criterion_main!(benches);
