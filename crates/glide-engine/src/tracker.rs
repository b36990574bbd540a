//! Segment tracking: which segment of its curve a slot plays, and when
//! to load the next one.
//!
//! Lookups only move forward along a curve. When a forward search runs
//! off the end, a repeating slot retries from the first segment at the
//! wrapped position, and a non-repeating slot is parked on its curve's
//! final value.

use glide_core::{Cubic, OutputRange, SegmentId, SegmentedCurve, SlotIndex};

use crate::slots::{SegmentState, SlotTable, Source};

/// What [`ensure_segment`] did to a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentChange {
    /// The slot has no curve; nothing was touched.
    Inert,
    /// The resolved segment was already loaded; no refit.
    Unchanged,
    /// A later segment was loaded and fitted.
    Loaded(SegmentId),
    /// Playback wrapped to the curve start and resolved to this segment.
    /// If it was already loaded, only the cursor was rebased.
    Wrapped(SegmentId),
    /// Playback ran past the end of a non-repeating curve.
    Finished,
}

/// Global playback position of a slot.
///
/// Loaded slots report their segment start plus the cursor, finished
/// slots the curve end plus the cursor. Inert and unloaded slots report
/// the bare cursor.
pub fn position(slots: &SlotTable<'_>, index: SlotIndex) -> f32 {
    let source = slots.source(index);
    let cursor = slots.cursor(index);
    match (source.curve, source.segment) {
        (Some(curve), SegmentState::Loaded(segment)) => {
            curve.segment_interval(segment).start() + cursor
        }
        (Some(curve), SegmentState::Finished) => curve_end(curve) + cursor,
        _ => cursor,
    }
}

/// Bind `curve` to a slot and load the segment covering `start_position`.
///
/// The caller evaluates the slot afterwards so its output is valid
/// immediately.
pub fn assign_curve<'c>(
    slots: &mut SlotTable<'c>,
    index: SlotIndex,
    curve: &'c dyn SegmentedCurve,
    start_position: f32,
    repeat: bool,
) -> SegmentChange {
    *slots.source_mut(index) = Source {
        curve: Some(curve),
        segment: SegmentState::Unloaded,
        repeat,
    };
    ensure_segment(slots, index, start_position)
}

/// Make a slot inert, holding its last output.
///
/// The cubic becomes the constant last value with a zero-length segment,
/// so bulk evaluation keeps reproducing that value.
pub fn clear_curve(slots: &mut SlotTable<'_>, index: SlotIndex) {
    let last = slots.value(index);
    *slots.source_mut(index) = Source::default();
    slots.load(index, 0.0, 0.0, Cubic::constant(last));
}

/// Make sure the slot has the segment covering `global_position` loaded.
pub fn ensure_segment(slots: &mut SlotTable<'_>, index: SlotIndex, global_position: f32) -> SegmentChange {
    let source = *slots.source(index);
    let Some(curve) = source.curve else {
        return SegmentChange::Inert;
    };
    let search_from = match source.segment {
        SegmentState::Unloaded => SegmentId::FIRST,
        SegmentState::Loaded(segment) => segment.next(),
        SegmentState::Finished => return SegmentChange::Unchanged,
    };

    let (segment, position, wrapped) = match curve.find_segment(global_position, search_from) {
        Some(segment) => (segment, global_position, false),
        None if source.repeat => {
            let position = wrap_position(curve, global_position);
            match curve.find_segment(position, SegmentId::FIRST) {
                Some(segment) => (segment, position, true),
                None => {
                    finish(slots, index, curve, global_position);
                    return SegmentChange::Finished;
                }
            }
        }
        None => {
            finish(slots, index, curve, global_position);
            return SegmentChange::Finished;
        }
    };

    let interval = curve.segment_interval(segment);
    // Rounding can put the position a hair before the segment start.
    let local_x = (position - interval.start()).max(0.0);

    if source.segment == SegmentState::Loaded(segment) {
        if wrapped {
            slots.set_cursor(index, local_x);
            return SegmentChange::Wrapped(segment);
        }
        return SegmentChange::Unchanged;
    }

    let cubic = normalized(curve.fit_segment(segment), slots.range(index));
    slots.load(index, local_x, interval.length(), cubic);
    slots.source_mut(index).segment = SegmentState::Loaded(segment);
    if wrapped {
        SegmentChange::Wrapped(segment)
    } else {
        SegmentChange::Loaded(segment)
    }
}

/// Fold a position past the curve end back into `[start, start + span)`.
fn wrap_position(curve: &dyn SegmentedCurve, position: f32) -> f32 {
    let start = curve.start_position();
    start + (position - start).rem_euclid(curve.total_span())
}

fn curve_end(curve: &dyn SegmentedCurve) -> f32 {
    curve.segment_interval(curve.last_segment()).end()
}

/// Park a slot on the constant end value of its curve.
fn finish(slots: &mut SlotTable<'_>, index: SlotIndex, curve: &dyn SegmentedCurve, position: f32) {
    let cursor = (position - curve_end(curve)).max(0.0);
    let cubic = normalized(Cubic::constant(curve.end_value()), slots.range(index));
    slots.load(index, cursor, f32::INFINITY, cubic);
    slots.source_mut(index).segment = SegmentState::Finished;
}

/// Bring a freshly fitted cubic's constant into a modular range.
///
/// At `x = 0` the cubic equals its constant, so this normalizes the
/// segment's first output.
fn normalized(mut cubic: Cubic, range: OutputRange) -> Cubic {
    if range.modular {
        cubic.set_coeff(0, range.interval.normalize_initial(cubic.coeff(0)));
    }
    cubic
}
