//! Curve contract compliance test helpers.
//!
//! These functions verify that a [`SegmentedCurve`] implementation
//! satisfies the invariants the engine relies on. They panic with a
//! descriptive message on the first violation, so they can be called
//! directly from `#[test]` functions in any crate.

use glide_core::{SegmentId, SegmentedCurve};
use indexmap::IndexSet;

fn segments(curve: &dyn SegmentedCurve) -> impl Iterator<Item = SegmentId> {
    (0..curve.segment_count() as u32).map(SegmentId)
}

/// Assert the curve has at least one segment and every segment has a
/// positive width.
pub fn assert_segments_non_empty(curve: &dyn SegmentedCurve) {
    assert!(curve.segment_count() > 0, "curve has no segments");
    for s in segments(curve) {
        let width = curve.segment_interval(s).length();
        assert!(width > 0.0, "segment {s} has non-positive width {width}");
    }
}

/// Assert that each segment starts exactly where the previous one ends.
pub fn assert_segments_tile(curve: &dyn SegmentedCurve) {
    let ids: Vec<SegmentId> = segments(curve).collect();
    for pair in ids.windows(2) {
        let a = curve.segment_interval(pair[0]);
        let b = curve.segment_interval(pair[1]);
        assert_eq!(
            a.end(),
            b.start(),
            "gap between segment {} (ends {}) and {} (starts {})",
            pair[0],
            a.end(),
            pair[1],
            b.start()
        );
    }
}

/// Assert that `total_span` equals the distance from the first segment's
/// start to the last segment's end.
pub fn assert_total_span_matches(curve: &dyn SegmentedCurve) {
    let first = curve.segment_interval(SegmentId::FIRST);
    let last = curve.segment_interval(curve.last_segment());
    let expected = last.end() - first.start();
    let span = curve.total_span();
    assert!(
        (span - expected).abs() <= f32::EPSILON * expected.abs().max(1.0),
        "total_span {span} != last end - first start = {expected}"
    );
}

/// Assert that a forward search from the first segment resolves each
/// segment's start and midpoint to that segment.
pub fn assert_find_segment_covers(curve: &dyn SegmentedCurve) {
    for s in segments(curve) {
        let interval = curve.segment_interval(s);
        let mid = interval.start() + 0.5 * interval.length();
        for position in [interval.start(), mid] {
            let found = curve.find_segment(position, SegmentId::FIRST);
            assert_eq!(
                found,
                Some(s),
                "find_segment({position}) = {found:?}, expected segment {s}"
            );
        }
    }
}

/// Assert that searching from segment `k` never returns a segment before
/// `k`, even for positions that lie earlier on the curve.
pub fn assert_find_segment_forward_only(curve: &dyn SegmentedCurve) {
    let origin = curve.start_position();
    for s in segments(curve) {
        let found = curve.find_segment(origin, s);
        assert_eq!(
            found,
            Some(s),
            "find_segment({origin}, from {s}) = {found:?}, expected {s}"
        );
    }
    let past = SegmentId(curve.segment_count() as u32);
    assert_eq!(
        curve.find_segment(origin, past),
        None,
        "search starting past the last segment must find nothing"
    );
}

/// Assert that positions past the end of the curve find no segment, and
/// the end point itself belongs to the last segment.
pub fn assert_past_end_is_none(curve: &dyn SegmentedCurve) {
    let end = curve.segment_interval(curve.last_segment()).end();
    assert_eq!(
        curve.find_segment(end, SegmentId::FIRST),
        Some(curve.last_segment()),
        "curve end point {end} must belong to the last segment"
    );
    let beyond = end + curve.total_span().max(1.0);
    assert_eq!(
        curve.find_segment(beyond, SegmentId::FIRST),
        None,
        "position {beyond} past the curve end must find no segment"
    );
}

/// Assert that sweeping the curve from start to end visits every segment
/// once, in increasing order.
pub fn assert_sweep_visits_segments_in_order(curve: &dyn SegmentedCurve) {
    let mut visited: IndexSet<SegmentId> = IndexSet::new();
    let mut current = SegmentId::FIRST;
    for s in segments(curve) {
        let interval = curve.segment_interval(s);
        let inside = interval.start() + 0.25 * interval.length();
        if let Some(found) = curve.find_segment(inside, current) {
            visited.insert(found);
            current = found;
        }
    }
    let expected: IndexSet<SegmentId> = segments(curve).collect();
    assert_eq!(
        visited.iter().collect::<Vec<_>>(),
        expected.iter().collect::<Vec<_>>(),
        "forward sweep did not visit every segment in order"
    );
}

/// Run all compliance checks on a curve.
pub fn run_full_compliance(curve: &dyn SegmentedCurve) {
    assert_segments_non_empty(curve);
    assert_segments_tile(curve);
    assert_total_span_matches(curve);
    assert_find_segment_covers(curve);
    assert_find_segment_forward_only(curve);
    assert_past_end_is_none(curve);
    assert_sweep_visits_segments_in_order(curve);
}
