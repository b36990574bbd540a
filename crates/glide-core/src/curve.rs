//! The curve collaborator contract.
//!
//! The engine never builds or owns curves. Callers hand it borrowed
//! `&dyn SegmentedCurve` references; the engine only asks a curve where
//! its segments are and what cubic approximates each one.

use crate::cubic::Cubic;
use crate::id::SegmentId;
use crate::range::Interval;

/// A piecewise-cubic curve split into consecutive segments along the
/// playback axis.
///
/// # Contract
///
/// - Segments are numbered `0..segment_count()` in increasing position
///   order and tile `[start, start + total_span()]` without gaps.
/// - Segment `n` covers the half-open interval
///   `[interval.start(), interval.end())`; the last segment also covers
///   its end point.
/// - [`find_segment`](Self::find_segment) only searches forward.
///
/// The `compliance` module of `glide-curve` checks these rules for any
/// implementation.
///
/// # Object Safety
///
/// This trait is designed for use as `&dyn SegmentedCurve`.
pub trait SegmentedCurve {
    /// Number of segments. Always at least one.
    fn segment_count(&self) -> usize;

    /// The first segment at or after `search_from` that covers `position`.
    ///
    /// Positions before the start of segment `search_from` resolve to
    /// `search_from` itself. Returns `None` if `position` lies past the end
    /// of the curve, or if `search_from` is out of range.
    fn find_segment(&self, position: f32, search_from: SegmentId) -> Option<SegmentId>;

    /// The interval `[start, start + width]` covered by `segment`.
    fn segment_interval(&self, segment: SegmentId) -> Interval;

    /// Total width of all segments; the wraparound period for repeating
    /// playback.
    fn total_span(&self) -> f32;

    /// The cubic approximating `segment`, in segment-local coordinates
    /// (`x = 0` at the segment start).
    fn fit_segment(&self, segment: SegmentId) -> Cubic;

    /// The last segment.
    fn last_segment(&self) -> SegmentId {
        SegmentId(self.segment_count().saturating_sub(1) as u32)
    }

    /// Value of the curve at its very end.
    ///
    /// Default implementation evaluates the last segment at its width.
    fn end_value(&self) -> f32 {
        let last = self.last_segment();
        self.fit_segment(last)
            .evaluate(self.segment_interval(last).length())
    }

    /// Start of the curve on the playback axis.
    fn start_position(&self) -> f32 {
        self.segment_interval(SegmentId::FIRST).start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two unit-width segments: a ramp from 0 to 1, then flat at 1.
    struct RampThenHold;

    impl SegmentedCurve for RampThenHold {
        fn segment_count(&self) -> usize {
            2
        }

        fn find_segment(&self, position: f32, search_from: SegmentId) -> Option<SegmentId> {
            (search_from.0..2)
                .map(SegmentId)
                .find(|s| position < (s.0 + 1) as f32 || (s.0 == 1 && position <= 2.0))
        }

        fn segment_interval(&self, segment: SegmentId) -> Interval {
            Interval::with_length(segment.0 as f32, 1.0)
        }

        fn total_span(&self) -> f32 {
            2.0
        }

        fn fit_segment(&self, segment: SegmentId) -> Cubic {
            match segment.0 {
                0 => Cubic::new([0.0, 1.0, 0.0, 0.0]),
                _ => Cubic::constant(1.0),
            }
        }
    }

    #[test]
    fn default_end_value_evaluates_last_segment() {
        assert_eq!(RampThenHold.end_value(), 1.0);
        assert_eq!(RampThenHold.last_segment(), SegmentId(1));
    }

    #[test]
    fn default_start_position_is_first_segment_start() {
        assert_eq!(RampThenHold.start_position(), 0.0);
    }

    #[test]
    fn usable_as_trait_object() {
        let curve: &dyn SegmentedCurve = &RampThenHold;
        assert_eq!(curve.find_segment(0.5, SegmentId::FIRST), Some(SegmentId(0)));
        assert_eq!(curve.find_segment(0.5, SegmentId(1)), Some(SegmentId(1)));
        assert_eq!(curve.find_segment(2.5, SegmentId::FIRST), None);
    }
}
