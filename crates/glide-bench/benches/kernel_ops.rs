//! Criterion micro-benchmarks for the bulk advance and evaluate kernels.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glide_core::{Cubic, Interval, OutputRange};
use glide_engine::advance::{advance_masked, advance_single_pass, FrameScratch};
use glide_engine::kernel::{BulkKernel, ReferenceKernel, VectorizedKernel};
use glide_engine::{AdvanceColumns, EvaluateColumns};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

struct Columns {
    cursors: Vec<f32>,
    lengths: Vec<f32>,
    cubics: Vec<Cubic>,
    ranges: Vec<OutputRange>,
    values: Vec<f32>,
}

/// Deterministic columns where roughly 2% of slots expire per advance.
fn columns(n: usize) -> Columns {
    let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
    let degrees = OutputRange::modular(Interval::new(-180.0, 180.0));
    let unit = OutputRange::clamped(Interval::new(0.0, 1.0));
    Columns {
        cursors: (0..n).map(|_| rng.random_range(0.0f32..1.0)).collect(),
        lengths: (0..n).map(|_| rng.random_range(0.5f32..1.5)).collect(),
        cubics: (0..n)
            .map(|_| {
                Cubic::new([
                    rng.random_range(-90.0f32..90.0),
                    rng.random_range(-1.0f32..1.0),
                    rng.random_range(-0.5f32..0.5),
                    rng.random_range(-0.1f32..0.1),
                ])
            })
            .collect(),
        ranges: (0..n)
            .map(|i| match i % 3 {
                0 => degrees,
                1 => unit,
                _ => OutputRange::IDENTITY,
            })
            .collect(),
        values: vec![0.0; n],
    }
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    for n in SIZES {
        let cols = columns(n);

        group.bench_with_input(BenchmarkId::new("single_pass", n), &n, |b, _| {
            let mut cursors = cols.cursors.clone();
            let mut expired = Vec::with_capacity(n);
            b.iter(|| {
                cursors.copy_from_slice(&cols.cursors);
                advance_single_pass(
                    black_box(0.02),
                    AdvanceColumns {
                        cursors: &mut cursors,
                        lengths: &cols.lengths,
                    },
                    &mut expired,
                );
                black_box(expired.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("masked", n), &n, |b, _| {
            let mut cursors = cols.cursors.clone();
            let mut scratch = FrameScratch::new();
            b.iter(|| {
                cursors.copy_from_slice(&cols.cursors);
                advance_masked(
                    black_box(0.02),
                    AdvanceColumns {
                        cursors: &mut cursors,
                        lengths: &cols.lengths,
                    },
                    &mut scratch,
                );
                black_box(scratch.expired.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("vectorized", n), &n, |b, _| {
            let mut cursors = cols.cursors.clone();
            let mut scratch = FrameScratch::new();
            b.iter(|| {
                cursors.copy_from_slice(&cols.cursors);
                VectorizedKernel.advance(
                    black_box(0.02),
                    AdvanceColumns {
                        cursors: &mut cursors,
                        lengths: &cols.lengths,
                    },
                    &mut scratch,
                );
                black_box(scratch.expired.len());
            });
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let kernels: [&dyn BulkKernel; 2] = [&ReferenceKernel, &VectorizedKernel];
    for n in SIZES {
        for kernel in kernels {
            let mut cols = columns(n);
            group.bench_with_input(BenchmarkId::new(kernel.name(), n), &n, |b, _| {
                b.iter(|| {
                    kernel.evaluate(EvaluateColumns {
                        cubics: &mut cols.cubics,
                        cursors: &cols.cursors,
                        ranges: &cols.ranges,
                        values: &mut cols.values,
                    });
                    black_box(&cols.values);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_advance, bench_evaluate);
criterion_main!(benches);
