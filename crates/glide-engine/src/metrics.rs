//! Per-frame counters and timings for the bulk evaluator.
//!
//! [`FrameMetrics`] captures what one
//! [`advance_frame`](crate::BulkSplineEvaluator::advance_frame) call did
//! and how long each phase took.

use glide_core::FrameId;

/// Counters and timings collected during a single frame.
///
/// All durations are in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameMetrics {
    /// The frame these metrics describe.
    pub frame: FrameId,
    /// Slot count during the frame.
    pub slots: u32,
    /// The delta every cursor was advanced by.
    pub delta: f32,
    /// Slots whose cursor ran past their segment, inert slots included.
    pub expired: u32,
    /// Slots that loaded a later segment.
    pub reloaded: u32,
    /// Repeating slots that wrapped back to the curve start.
    pub wrapped: u32,
    /// Slots that ran past the end of a non-repeating curve this frame.
    pub finished: u32,
    /// Time spent in the bulk advance, in microseconds.
    pub advance_us: u64,
    /// Time spent re-initializing expired slots, in microseconds.
    pub reinit_us: u64,
    /// Time spent in the bulk evaluation, in microseconds.
    pub evaluate_us: u64,
    /// Wall-clock time for the whole frame, in microseconds.
    pub total_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = FrameMetrics::default();
        assert_eq!(m.frame, FrameId(0));
        assert_eq!(m.slots, 0);
        assert_eq!(m.expired, 0);
        assert_eq!(m.reloaded, 0);
        assert_eq!(m.wrapped, 0);
        assert_eq!(m.finished, 0);
        assert_eq!(m.total_us, 0);
    }
}
