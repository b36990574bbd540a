//! Piecewise cubic curves built from per-segment descriptions.

use crate::error::CurveError;
use glide_core::{Cubic, CubicInit, Interval, SegmentId, SegmentedCurve};

/// How one segment of a [`PiecewiseCubic`] is described.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentShape {
    /// Endpoint values and slopes; the cubic is fitted on demand.
    Hermite(CubicInit),
    /// Explicit coefficients in segment-local coordinates.
    Coefficients {
        /// Width of the segment along the playback axis.
        width: f32,
        /// The polynomial, with `x = 0` at the segment start.
        cubic: Cubic,
    },
}

impl SegmentShape {
    /// Width of the segment along the playback axis.
    pub fn width(&self) -> f32 {
        match self {
            Self::Hermite(init) => init.width_x,
            Self::Coefficients { width, .. } => *width,
        }
    }

    /// The cubic for this segment.
    pub fn fit(&self) -> Cubic {
        match self {
            Self::Hermite(init) => Cubic::from_init(init),
            Self::Coefficients { cubic, .. } => *cubic,
        }
    }
}

/// A curve made of consecutive cubic segments.
///
/// Segment `n` starts where segment `n - 1` ends; the first segment starts
/// at the curve's start position. Immutable once built.
///
/// # Examples
///
/// ```
/// use glide_core::{SegmentId, SegmentedCurve};
/// use glide_curve::PiecewiseCubic;
///
/// let curve = PiecewiseCubic::builder(0.0)
///     .linear(0.0, 10.0, 5.0)
///     .flat(10.0, 5.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(curve.segment_count(), 2);
/// assert_eq!(curve.total_span(), 10.0);
/// assert_eq!(curve.find_segment(7.0, SegmentId::FIRST), Some(SegmentId(1)));
/// assert_eq!(curve.find_segment(12.0, SegmentId::FIRST), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseCubic {
    start: f32,
    /// `ends[n]` is the end position of segment `n`; strictly increasing.
    ends: Vec<f32>,
    shapes: Vec<SegmentShape>,
}

impl PiecewiseCubic {
    /// Build a curve starting at `start` from the given segment shapes.
    ///
    /// Returns `Err(CurveError::EmptyCurve)` if `shapes` is empty,
    /// `Err(CurveError::InvalidWidth)` if a width is not finite and
    /// positive, and `Err(CurveError::InvalidStart)` if `start` is not
    /// finite.
    pub fn new(start: f32, shapes: Vec<SegmentShape>) -> Result<Self, CurveError> {
        if !start.is_finite() {
            return Err(CurveError::InvalidStart { start });
        }
        if shapes.is_empty() {
            return Err(CurveError::EmptyCurve);
        }
        if shapes.len() > u32::MAX as usize {
            return Err(CurveError::TooManySegments {
                count: shapes.len(),
            });
        }

        let mut ends = Vec::with_capacity(shapes.len());
        let mut cursor = start;
        for (segment, shape) in shapes.iter().enumerate() {
            let width = shape.width();
            if !width.is_finite() || width <= 0.0 {
                return Err(CurveError::InvalidWidth { segment, width });
            }
            cursor += width;
            ends.push(cursor);
        }

        Ok(Self { start, ends, shapes })
    }

    /// Build a curve from Hermite segment descriptions.
    pub fn from_inits(start: f32, inits: &[CubicInit]) -> Result<Self, CurveError> {
        Self::new(start, inits.iter().copied().map(SegmentShape::Hermite).collect())
    }

    /// Start an incremental builder at position `start`.
    pub fn builder(start: f32) -> PiecewiseCubicBuilder {
        PiecewiseCubicBuilder {
            start,
            shapes: Vec::new(),
        }
    }

    /// End position of the curve.
    pub fn end_position(&self) -> f32 {
        // Construction rejects empty curves.
        self.ends[self.ends.len() - 1]
    }

    /// All segment shapes in order.
    pub fn shapes(&self) -> &[SegmentShape] {
        &self.shapes
    }

    /// Sample the curve directly at a global position.
    ///
    /// Positions outside the curve hold the nearest end value. Intended
    /// for tests and tooling; the engine evaluates cached cubics instead.
    pub fn sample(&self, position: f32) -> f32 {
        let segment = if position < self.start {
            SegmentId::FIRST
        } else {
            match self.find_segment(position, SegmentId::FIRST) {
                Some(segment) => segment,
                None => return self.end_value(),
            }
        };
        let interval = self.segment_interval(segment);
        let local = (position - interval.start()).max(0.0);
        self.shapes[segment.get()].fit().evaluate(local)
    }
}

impl SegmentedCurve for PiecewiseCubic {
    fn segment_count(&self) -> usize {
        self.shapes.len()
    }

    fn find_segment(&self, position: f32, search_from: SegmentId) -> Option<SegmentId> {
        let from = search_from.get();
        if from >= self.ends.len() {
            return None;
        }
        let tail = &self.ends[from..];
        let offset = tail.partition_point(|&end| end <= position);
        if offset < tail.len() {
            return Some(SegmentId((from + offset) as u32));
        }
        // The last segment is closed at its end.
        if position <= self.end_position() {
            return Some(self.last_segment());
        }
        None
    }

    fn segment_interval(&self, segment: SegmentId) -> Interval {
        let n = segment.get();
        let start = if n == 0 { self.start } else { self.ends[n - 1] };
        Interval::new(start, self.ends[n])
    }

    fn total_span(&self) -> f32 {
        self.end_position() - self.start
    }

    fn fit_segment(&self, segment: SegmentId) -> Cubic {
        self.shapes[segment.get()].fit()
    }

    fn start_position(&self) -> f32 {
        self.start
    }
}

/// Incremental builder for [`PiecewiseCubic`].
///
/// Created by [`PiecewiseCubic::builder`]. Segments are appended in
/// playback order.
#[derive(Clone, Debug)]
pub struct PiecewiseCubicBuilder {
    start: f32,
    shapes: Vec<SegmentShape>,
}

impl PiecewiseCubicBuilder {
    /// Append a Hermite segment.
    pub fn hermite(mut self, init: CubicInit) -> Self {
        self.shapes.push(SegmentShape::Hermite(init));
        self
    }

    /// Append a segment with explicit coefficients.
    pub fn cubic(mut self, width: f32, cubic: Cubic) -> Self {
        self.shapes.push(SegmentShape::Coefficients { width, cubic });
        self
    }

    /// Append a segment that holds `y` for `width`.
    pub fn flat(self, y: f32, width: f32) -> Self {
        self.hermite(CubicInit::flat(y, width))
    }

    /// Append a straight segment from `start_y` to `end_y`.
    pub fn linear(self, start_y: f32, end_y: f32, width: f32) -> Self {
        self.hermite(CubicInit::linear(start_y, end_y, width))
    }

    /// Build the curve, validating all segments.
    ///
    /// # Errors
    ///
    /// See [`PiecewiseCubic::new`].
    pub fn build(self) -> Result<PiecewiseCubic, CurveError> {
        PiecewiseCubic::new(self.start, self.shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn two_segments() -> PiecewiseCubic {
        PiecewiseCubic::builder(0.0)
            .cubic(5.0, Cubic::new([0.0, 1.0, 0.0, 0.0]))
            .cubic(5.0, Cubic::new([5.0, 0.0, 1.0, 0.0]))
            .build()
            .unwrap()
    }

    // ── Lookup tests ────────────────────────────────────────────

    #[test]
    fn find_segment_covering() {
        let c = two_segments();
        assert_eq!(c.find_segment(0.0, SegmentId::FIRST), Some(SegmentId(0)));
        assert_eq!(c.find_segment(4.9, SegmentId::FIRST), Some(SegmentId(0)));
        assert_eq!(c.find_segment(5.0, SegmentId::FIRST), Some(SegmentId(1)));
        assert_eq!(c.find_segment(9.9, SegmentId::FIRST), Some(SegmentId(1)));
    }

    #[test]
    fn find_segment_end_point_belongs_to_last() {
        let c = two_segments();
        assert_eq!(c.find_segment(10.0, SegmentId::FIRST), Some(SegmentId(1)));
        assert_eq!(c.find_segment(10.5, SegmentId::FIRST), None);
    }

    #[test]
    fn find_segment_never_searches_backward() {
        let c = two_segments();
        assert_eq!(c.find_segment(1.0, SegmentId(1)), Some(SegmentId(1)));
        assert_eq!(c.find_segment(1.0, SegmentId(2)), None);
    }

    #[test]
    fn intervals_tile() {
        let c = two_segments();
        assert_eq!(c.segment_interval(SegmentId(0)), Interval::new(0.0, 5.0));
        assert_eq!(c.segment_interval(SegmentId(1)), Interval::new(5.0, 10.0));
        assert_eq!(c.total_span(), 10.0);
    }

    #[test]
    fn offset_start() {
        let c = PiecewiseCubic::builder(-2.0).flat(1.0, 4.0).build().unwrap();
        assert_eq!(c.start_position(), -2.0);
        assert_eq!(c.total_span(), 4.0);
        assert_eq!(c.find_segment(-3.0, SegmentId::FIRST), Some(SegmentId(0)));
    }

    // ── Fitting tests ───────────────────────────────────────────

    #[test]
    fn fit_returns_stored_coefficients() {
        let c = two_segments();
        assert_eq!(c.fit_segment(SegmentId(1)), Cubic::new([5.0, 0.0, 1.0, 0.0]));
    }

    #[test]
    fn end_value_and_sample() {
        let c = two_segments();
        assert_eq!(c.end_value(), 30.0);
        assert_eq!(c.sample(2.0), 2.0);
        assert_eq!(c.sample(7.0), 9.0);
        assert_eq!(c.sample(50.0), 30.0);
        assert_eq!(c.sample(-1.0), 0.0);
    }

    #[test]
    fn hermite_segments_are_continuous() {
        let c = PiecewiseCubic::from_inits(
            0.0,
            &[
                CubicInit::linear(0.0, 2.0, 1.0),
                CubicInit {
                    start_y: 2.0,
                    start_derivative: 2.0,
                    end_y: 0.0,
                    end_derivative: 0.0,
                    width_x: 3.0,
                },
            ],
        )
        .unwrap();
        let left = c.fit_segment(SegmentId(0)).evaluate(1.0);
        let right = c.fit_segment(SegmentId(1)).evaluate(0.0);
        assert!((left - right).abs() < 1e-5);
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_empty_is_error() {
        assert_eq!(PiecewiseCubic::new(0.0, vec![]).unwrap_err(), CurveError::EmptyCurve);
    }

    #[test]
    fn new_rejects_bad_width() {
        let err = PiecewiseCubic::builder(0.0)
            .flat(0.0, 1.0)
            .flat(0.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CurveError::InvalidWidth {
                segment: 1,
                width: 0.0
            }
        );
        assert!(PiecewiseCubic::builder(0.0)
            .flat(0.0, f32::INFINITY)
            .build()
            .is_err());
    }

    #[test]
    fn new_rejects_bad_start() {
        let err = PiecewiseCubic::builder(f32::NAN).flat(0.0, 1.0).build();
        assert!(matches!(err, Err(CurveError::InvalidStart { .. })));
    }

    // ── Compliance ──────────────────────────────────────────────

    #[test]
    fn compliance_two_segments() {
        compliance::run_full_compliance(&two_segments());
    }

    #[test]
    fn compliance_single_segment() {
        let c = PiecewiseCubic::builder(3.0).linear(0.0, 1.0, 0.5).build().unwrap();
        compliance::run_full_compliance(&c);
    }

    proptest! {
        #[test]
        fn random_curves_comply(widths in prop::collection::vec(0.01f32..10.0, 1..24)) {
            let shapes = widths
                .iter()
                .map(|&w| SegmentShape::Hermite(CubicInit::flat(1.0, w)))
                .collect();
            let c = PiecewiseCubic::new(0.0, shapes).unwrap();
            compliance::run_full_compliance(&c);
        }

        #[test]
        fn lookup_interval_contains_position(
            widths in prop::collection::vec(0.01f32..10.0, 1..24),
            fraction in 0.0f32..1.0,
        ) {
            let shapes = widths
                .iter()
                .map(|&w| SegmentShape::Hermite(CubicInit::flat(0.0, w)))
                .collect();
            let c = PiecewiseCubic::new(0.0, shapes).unwrap();
            let position = fraction * c.total_span();
            let segment = c.find_segment(position, SegmentId::FIRST).unwrap();
            prop_assert!(c.segment_interval(segment).contains(position));
        }
    }
}
