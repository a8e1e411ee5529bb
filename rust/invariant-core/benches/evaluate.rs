use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use invariant_core::{evaluate_genus, run_batch, run_batch_parallel, Genus};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_genus");

    for g in [0u32, 20, 60, 120] {
        group.bench_with_input(BenchmarkId::from_parameter(g), &Genus::new(g), |b, &genus| {
            b.iter(|| evaluate_genus(genus));
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_0_120");
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| run_batch(Genus::new(0), Genus::new(120)));
    });
    group.bench_function("parallel", |b| {
        b.iter(|| run_batch_parallel(Genus::new(0), Genus::new(120)));
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_sweep);
criterion_main!(benches);
