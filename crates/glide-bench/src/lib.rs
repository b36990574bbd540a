//! Benchmark profiles and utilities for the Glide bulk spline engine.
//!
//! Provides pre-built population profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 10K slots over 256 distinct curves
//! - [`stress_profile`]: 100K slots over 1024 distinct curves
//! - [`populate`]: assign a profile's curves to an evaluator, deterministically

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use glide_core::{Interval, SegmentedCurve, SlotIndex};
use glide_curve::PiecewiseCubic;
use glide_engine::BulkSplineEvaluator;
use glide_test_utils::fixtures::population;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A reproducible slot population.
#[derive(Clone, Debug)]
pub struct BenchProfile {
    /// Number of slots to fill.
    pub slots: usize,
    /// Distinct curves, shared round-robin across slots.
    pub curves: Vec<PiecewiseCubic>,
    /// Fraction of slots with a modular `[-180, 180]` range.
    pub modular_fraction: f32,
    /// Fraction of slots that loop.
    pub repeat_fraction: f32,
    /// Seed for slot start positions and flags.
    pub seed: u64,
}

/// 10K slots, 256 curves of up to 8 segments, a quarter of them modular.
pub fn reference_profile(seed: u64) -> BenchProfile {
    BenchProfile {
        slots: 10_000,
        curves: population(seed, 256, 8),
        modular_fraction: 0.25,
        repeat_fraction: 0.75,
        seed,
    }
}

/// 100K slots, 1024 curves of up to 16 segments.
///
/// Same mix as [`reference_profile`] at 10x the slot count.
pub fn stress_profile(seed: u64) -> BenchProfile {
    BenchProfile {
        slots: 100_000,
        curves: population(seed, 1024, 16),
        modular_fraction: 0.25,
        repeat_fraction: 0.75,
        seed,
    }
}

/// Resize `evaluator` to the profile's slot count and assign every slot.
pub fn populate<'c>(evaluator: &mut BulkSplineEvaluator<'c>, profile: &'c BenchProfile) {
    evaluator.resize(profile.slots);
    if profile.curves.is_empty() {
        return;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(profile.seed);
    for i in 0..profile.slots {
        let index = SlotIndex(i as u32);
        let curve = &profile.curves[i % profile.curves.len()];
        if rng.random::<f32>() < profile.modular_fraction {
            evaluator.set_range(index, Interval::new(-180.0, 180.0), true);
        }
        let start = curve.start_position() + curve.total_span() * rng.random::<f32>();
        let repeat = rng.random::<f32>() < profile.repeat_fraction;
        evaluator.assign_curve(index, curve, start, repeat);
    }
}
