//! Reusable curve fixtures.
//!
//! - [`two_segment_curve`]: `[0, 5)` with [`F1`], `[5, 10)` with [`F2`].
//! - [`ramp_curve`]: a repeating-friendly 0 -> span ramp split in two.
//! - [`constant_curve`]: one flat segment.
//! - [`angle_sweep`]: a rising angle that crosses many turns of 360.
//! - [`population`]: seeded random Hermite curves for bulk tests and benches.

use glide_core::{Cubic, CubicInit};
use glide_curve::PiecewiseCubic;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// First segment of [`two_segment_curve`]: `y = x`.
pub const F1: Cubic = Cubic::new([0.0, 1.0, 0.0, 0.0]);

/// Second segment of [`two_segment_curve`]: `y = 10 - 2x` (local `x`).
pub const F2: Cubic = Cubic::new([10.0, -2.0, 0.0, 0.0]);

/// Two explicit cubics: [`F1`] over `[0, 5)` and [`F2`] over `[5, 10]`.
pub fn two_segment_curve() -> PiecewiseCubic {
    PiecewiseCubic::builder(0.0)
        .cubic(5.0, F1)
        .cubic(5.0, F2)
        .build()
        .expect("two-segment fixture is valid")
}

/// Linear ramp from 0 to `span` over `[0, span]`, split into two equal
/// segments.
pub fn ramp_curve(span: f32) -> PiecewiseCubic {
    let half = 0.5 * span;
    PiecewiseCubic::builder(0.0)
        .linear(0.0, half, half)
        .linear(half, span, half)
        .build()
        .expect("ramp fixture is valid")
}

/// A single flat segment holding `y` over `[0, width]`.
pub fn constant_curve(y: f32, width: f32) -> PiecewiseCubic {
    PiecewiseCubic::builder(0.0)
        .flat(y, width)
        .build()
        .expect("constant fixture is valid")
}

/// Angle rising at `degrees_per_unit` over `segments` unit-width segments.
///
/// The raw curve leaves `[0, 360]` after a few segments, which exercises
/// modular renormalization.
pub fn angle_sweep(degrees_per_unit: f32, segments: usize) -> PiecewiseCubic {
    let inits: Vec<CubicInit> = (0..segments)
        .map(|i| {
            let y0 = degrees_per_unit * i as f32;
            CubicInit::linear(y0, y0 + degrees_per_unit, 1.0)
        })
        .collect();
    PiecewiseCubic::from_inits(0.0, &inits).expect("angle fixture is valid")
}

/// A seeded curve with 1..=`max_segments` Hermite segments of random
/// width in `[0.25, 2)` and values in `[-10, 10)`.
pub fn random_curve(rng: &mut ChaCha8Rng, max_segments: usize) -> PiecewiseCubic {
    let count = rng.random_range(1..=max_segments.max(1));
    let mut y = rng.random_range(-10.0f32..10.0);
    let mut slope = rng.random_range(-2.0f32..2.0);
    let mut builder = PiecewiseCubic::builder(rng.random_range(-5.0f32..5.0));
    for _ in 0..count {
        let width = rng.random_range(0.25f32..2.0);
        let end_y = rng.random_range(-10.0f32..10.0);
        let end_slope = rng.random_range(-2.0f32..2.0);
        builder = builder.hermite(CubicInit {
            start_y: y,
            start_derivative: slope,
            end_y,
            end_derivative: end_slope,
            width_x: width,
        });
        y = end_y;
        slope = end_slope;
    }
    builder.build().expect("random fixture is valid")
}

/// `count` seeded curves for bulk tests and benchmarks.
pub fn population(seed: u64, count: usize, max_segments: usize) -> Vec<PiecewiseCubic> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| random_curve(&mut rng, max_segments))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::SegmentedCurve;
    use glide_curve::compliance::run_full_compliance;

    #[test]
    fn fixtures_are_compliant() {
        run_full_compliance(&two_segment_curve());
        run_full_compliance(&ramp_curve(10.0));
        run_full_compliance(&constant_curve(3.0, 2.0));
        run_full_compliance(&angle_sweep(150.0, 8));
        for curve in population(42, 32, 6) {
            run_full_compliance(&curve);
        }
    }

    #[test]
    fn two_segment_shape() {
        let c = two_segment_curve();
        assert_eq!(c.segment_count(), 2);
        assert_eq!(c.total_span(), 10.0);
        assert_eq!(c.sample(4.0), 4.0);
        assert_eq!(c.sample(6.0), 8.0);
    }

    #[test]
    fn population_is_deterministic() {
        let a = population(9, 4, 5);
        let b = population(9, 4, 5);
        assert_eq!(a, b);
    }
}
