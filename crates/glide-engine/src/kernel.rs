//! Interchangeable bulk advance/evaluate backends.
//!
//! A [`BulkKernel`] performs the two per-frame bulk passes over the slot
//! columns. Every kernel must be bit-identical to [`ReferenceKernel`]:
//! same expired list in the same order, same cursor bits, same output
//! bits and same cubic coefficient bits. The dispatcher's `Verify`
//! strategy checks this frame by frame.
//!
//! [`VectorizedKernel`] processes slots in fixed [`LANES`]-wide chunks
//! with branch-free lane bodies that LLVM auto-vectorizes, plus a scalar
//! tail for the remainder.

use glide_core::{Cubic, OutputRange};

use crate::advance::{advance_single_pass, compact_mask, expiry_mask, FrameScratch};
use crate::evaluate::evaluate_all;
use crate::slots::{AdvanceColumns, EvaluateColumns};

/// Lane width of the vectorized kernel (one AVX2 register of `f32`).
pub const LANES: usize = 8;

/// A bulk advance/evaluate backend.
///
/// # Contract
///
/// - [`advance`](Self::advance) adds `delta` to every cursor and leaves
///   the ascending list of slots whose cursor exceeds its length in
///   `scratch.expired`.
/// - [`evaluate`](Self::evaluate) writes every output value and, for
///   modular slots, adds the wrap adjustment to the cubic's constant.
/// - Results are bit-identical to [`ReferenceKernel`].
///
/// # Object Safety
///
/// This trait is designed for use as `Box<dyn BulkKernel>`.
pub trait BulkKernel {
    /// Short name used in logs and verification reports.
    fn name(&self) -> &'static str;

    /// Advance all cursors and collect expired slots.
    fn advance(&self, delta: f32, columns: AdvanceColumns<'_>, scratch: &mut FrameScratch);

    /// Evaluate all cubics into the output column.
    fn evaluate(&self, columns: EvaluateColumns<'_>);
}

/// Portable scalar backend: single-pass advance and a plain evaluation
/// loop. The behavior every other kernel is measured against.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceKernel;

impl BulkKernel for ReferenceKernel {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn advance(&self, delta: f32, columns: AdvanceColumns<'_>, scratch: &mut FrameScratch) {
        advance_single_pass(delta, columns, &mut scratch.expired);
    }

    fn evaluate(&self, columns: EvaluateColumns<'_>) {
        evaluate_all(columns);
    }
}

/// Chunked, branch-free backend using mask-then-compact advance.
#[derive(Clone, Copy, Debug, Default)]
pub struct VectorizedKernel;

/// Bitwise select: `a` if `cond`, else `b`, without a branch.
#[inline(always)]
fn select(cond: bool, a: f32, b: f32) -> f32 {
    let mask = u32::from(cond).wrapping_neg();
    f32::from_bits((a.to_bits() & mask) | (b.to_bits() & !mask))
}

/// One evaluation lane. Mirrors `evaluate_index` with selects in place of
/// branches.
#[inline(always)]
fn evaluate_lane(cubic: &mut Cubic, x: f32, range: OutputRange) -> f32 {
    let [c0, c1, c2, c3] = cubic.coeffs();
    let raw = ((c3 * x + c2) * x + c1) * x + c0;

    let interval = range.interval;
    let length = interval.length();
    let up = select(raw < interval.start(), length, 0.0);
    let down = select(raw > interval.end(), length, 0.0);
    let adjustment = up - down;

    let wrapped = raw + adjustment;
    let clamped = interval.clamp(raw);
    let value = select(range.modular, wrapped, clamped);
    cubic.set_coeff(0, select(range.modular, c0 + adjustment, c0));

    debug_assert!(
        !range.modular || interval.contains(value),
        "modular value {value} (raw {raw}) outside [{}, {}]",
        interval.start(),
        interval.end()
    );
    value
}

impl BulkKernel for VectorizedKernel {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn advance(&self, delta: f32, columns: AdvanceColumns<'_>, scratch: &mut FrameScratch) {
        let AdvanceColumns { cursors, lengths } = columns;
        debug_assert_eq!(cursors.len(), lengths.len());
        let mask = &mut scratch.mask;
        mask.clear();
        mask.resize(cursors.len(), 0);

        let mut c = cursors.chunks_exact_mut(LANES);
        let mut l = lengths.chunks_exact(LANES);
        let mut m = mask.chunks_exact_mut(LANES);
        for ((cx, lx), mx) in (&mut c).zip(&mut l).zip(&mut m) {
            for lane in 0..LANES {
                let x = cx[lane] + delta;
                cx[lane] = x;
                mx[lane] = expiry_mask(x, lx[lane]);
            }
        }
        for ((x, &len), mk) in c
            .into_remainder()
            .iter_mut()
            .zip(l.remainder())
            .zip(m.into_remainder())
        {
            *x += delta;
            *mk = expiry_mask(*x, len);
        }

        compact_mask(&scratch.mask, &mut scratch.expired);
    }

    fn evaluate(&self, columns: EvaluateColumns<'_>) {
        let EvaluateColumns {
            cubics,
            cursors,
            ranges,
            values,
        } = columns;
        debug_assert_eq!(cubics.len(), cursors.len());
        debug_assert_eq!(cubics.len(), ranges.len());
        debug_assert_eq!(cubics.len(), values.len());

        let mut cb = cubics.chunks_exact_mut(LANES);
        let mut xs = cursors.chunks_exact(LANES);
        let mut rs = ranges.chunks_exact(LANES);
        let mut vs = values.chunks_exact_mut(LANES);
        for (((cc, xc), rc), vc) in (&mut cb).zip(&mut xs).zip(&mut rs).zip(&mut vs) {
            for lane in 0..LANES {
                vc[lane] = evaluate_lane(&mut cc[lane], xc[lane], rc[lane]);
            }
        }
        for (((cubic, &x), &range), value) in cb
            .into_remainder()
            .iter_mut()
            .zip(xs.remainder())
            .zip(rs.remainder())
            .zip(vs.into_remainder())
        {
            *value = evaluate_lane(cubic, x, range);
        }
    }
}
