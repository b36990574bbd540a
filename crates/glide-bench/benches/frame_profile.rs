//! Criterion benchmarks for full frames over the reference populations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glide_bench::{populate, reference_profile, stress_profile, BenchProfile};
use glide_engine::{BulkSplineEvaluator, EvaluatorConfig, Strategy};

const DT: f32 = 1.0 / 60.0;

fn evaluator<'c>(strategy: Strategy) -> BulkSplineEvaluator<'c> {
    BulkSplineEvaluator::new(EvaluatorConfig::default().with_strategy(strategy)).unwrap()
}

fn bench_profile(c: &mut Criterion, name: &str, profile: &BenchProfile) {
    let mut group = c.benchmark_group(name);
    for strategy in Strategy::ALL {
        let mut e = evaluator(strategy);
        populate(&mut e, profile);
        // Warm up: grow scratch buffers before measuring.
        e.advance_frame(DT);

        group.bench_with_input(BenchmarkId::from_parameter(strategy), &strategy, |b, _| {
            b.iter(|| {
                let m = e.advance_frame(black_box(DT));
                black_box(m);
            });
        });
    }
    group.finish();
}

fn bench_frame_10k(c: &mut Criterion) {
    let profile = reference_profile(42);
    bench_profile(c, "frame_10k", &profile);
}

fn bench_frame_100k(c: &mut Criterion) {
    let profile = stress_profile(42);
    bench_profile(c, "frame_100k", &profile);
}

fn bench_populate_10k(c: &mut Criterion) {
    let profile = reference_profile(42);
    c.bench_function("populate_10k", |b| {
        b.iter(|| {
            let mut e = evaluator(Strategy::Reference);
            populate(&mut e, &profile);
            black_box(e.num_slots());
        });
    });
}

criterion_group!(benches, bench_frame_10k, bench_frame_100k, bench_populate_10k);
criterion_main!(benches);
