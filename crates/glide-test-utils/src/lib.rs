//! Test utilities and mock types for Glide development.
//!
//! Provides a [`CountingCurve`] wrapper that records how often the engine
//! queries a curve, and the curve fixtures in [`fixtures`]. Seeded
//! populations are drawn from a `ChaCha8Rng`.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;

use glide_core::{Cubic, Interval, SegmentId, SegmentedCurve};

/// Wraps a curve and counts calls to its lookup and fit methods.
///
/// Useful for asserting that the engine does not refit a segment it
/// already has loaded.
pub struct CountingCurve<C> {
    inner: C,
    finds: Cell<usize>,
    fits: Cell<usize>,
}

impl<C: SegmentedCurve> CountingCurve<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            finds: Cell::new(0),
            fits: Cell::new(0),
        }
    }

    /// Number of [`SegmentedCurve::find_segment`] calls so far.
    pub fn finds(&self) -> usize {
        self.finds.get()
    }

    /// Number of [`SegmentedCurve::fit_segment`] calls so far.
    pub fn fits(&self) -> usize {
        self.fits.get()
    }

    /// Reset both counters.
    pub fn reset(&self) {
        self.finds.set(0);
        self.fits.set(0);
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: SegmentedCurve> SegmentedCurve for CountingCurve<C> {
    fn segment_count(&self) -> usize {
        self.inner.segment_count()
    }

    fn find_segment(&self, position: f32, search_from: SegmentId) -> Option<SegmentId> {
        self.finds.set(self.finds.get() + 1);
        self.inner.find_segment(position, search_from)
    }

    fn segment_interval(&self, segment: SegmentId) -> Interval {
        self.inner.segment_interval(segment)
    }

    fn total_span(&self) -> f32 {
        self.inner.total_span()
    }

    fn fit_segment(&self, segment: SegmentId) -> Cubic {
        self.fits.set(self.fits.get() + 1);
        self.inner.fit_segment(segment)
    }

    fn start_position(&self) -> f32 {
        self.inner.start_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_curve::PiecewiseCubic;

    #[test]
    fn counting_curve_counts() {
        let curve = CountingCurve::new(
            PiecewiseCubic::builder(0.0)
                .flat(1.0, 1.0)
                .build()
                .unwrap(),
        );
        curve.find_segment(0.5, SegmentId::FIRST);
        curve.fit_segment(SegmentId::FIRST);
        curve.fit_segment(SegmentId::FIRST);
        assert_eq!(curve.finds(), 1);
        assert_eq!(curve.fits(), 2);
        curve.reset();
        assert_eq!(curve.fits(), 0);
    }
}
