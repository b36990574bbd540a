//! The bulk spline evaluator: the public face of the engine.
//!
//! [`BulkSplineEvaluator`] owns a [`SlotTable`], a [`Dispatcher`] and
//! the per-frame scratch buffers. A frame is:
//!
//! 1. bulk advance of every cursor by the frame delta,
//! 2. segment re-initialization for each expired slot,
//! 3. bulk evaluation of every slot into the output column.
//!
//! All three run synchronously inside
//! [`advance_frame`](BulkSplineEvaluator::advance_frame).

use std::time::Instant;

use glide_core::{FrameId, Interval, OutputRange, SegmentId, SegmentedCurve, SlotIndex};
use log::{debug, info, trace, warn};

use crate::advance::FrameScratch;
use crate::config::{ConfigError, EvaluatorConfig, Strategy};
use crate::dispatch::Dispatcher;
use crate::evaluate::evaluate_slot;
use crate::kernel::BulkKernel;
use crate::metrics::FrameMetrics;
use crate::slots::SlotTable;
use crate::tracker::{self, SegmentChange};

/// Advances and samples a large set of spline playback slots per frame.
///
/// Curves are borrowed for `'c`; every assigned curve must outlive the
/// evaluator. Slot indices are plain positions in the table and stay
/// valid until the caller resizes or relocates.
///
/// Index arguments are not range-checked in release builds; passing an
/// index `>= num_slots()` to anything other than
/// [`is_active`](Self::is_active) panics on the slice access.
#[derive(Debug)]
pub struct BulkSplineEvaluator<'c> {
    slots: SlotTable<'c>,
    dispatcher: Dispatcher,
    scratch: FrameScratch,
    frame: FrameId,
    last_metrics: FrameMetrics,
}

impl<'c> BulkSplineEvaluator<'c> {
    /// Create an evaluator from a validated configuration.
    pub fn new(config: EvaluatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dispatcher = Dispatcher::new(config.strategy);
        Ok(Self::build(config, dispatcher))
    }

    /// Create an evaluator whose alternate kernel is `kernel`.
    ///
    /// Under [`Strategy::Vectorized`] the kernel drives the live columns;
    /// under [`Strategy::Verify`] it is checked against the reference every
    /// frame.
    pub fn with_kernel(
        config: EvaluatorConfig,
        kernel: Box<dyn BulkKernel>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dispatcher = Dispatcher::with_alternate(config.strategy, kernel);
        Ok(Self::build(config, dispatcher))
    }

    fn build(config: EvaluatorConfig, dispatcher: Dispatcher) -> Self {
        info!(
            "bulk spline evaluator: strategy={} kernel={} alternate={} slots={}",
            config.strategy,
            dispatcher.active_kernel(),
            dispatcher.alternate_kernel(),
            config.initial_slots
        );
        Self {
            slots: SlotTable::with_len(config.initial_slots),
            dispatcher,
            scratch: FrameScratch::new(),
            frame: FrameId::default(),
            last_metrics: FrameMetrics::default(),
        }
    }

    // ── Layout ─────────────────────────────────────────────────

    /// Grow or shrink the table to `count` slots. New slots are inert.
    pub fn resize(&mut self, count: usize) {
        if count > SlotTable::MAX_SLOTS {
            warn!(
                "slot count {count} exceeds the addressable maximum, capping at {}",
                SlotTable::MAX_SLOTS
            );
        }
        debug!("resize slots {} -> {}", self.slots.len(), count);
        self.slots.resize(count);
    }

    /// Copy slot `src` over slot `dst`. `src` is left as it was.
    pub fn relocate(&mut self, src: SlotIndex, dst: SlotIndex) {
        debug!("relocate slot {src} -> {dst}");
        self.slots.relocate(src, dst);
    }

    /// Number of slots.
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    // ── Ranges ─────────────────────────────────────────────────

    /// Set a slot's output interval and whether it wraps.
    ///
    /// The stored output is not recomputed until the next frame. Switching
    /// a loaded slot to a modular range should be followed by
    /// [`assign_curve`](Self::assign_curve) so the loaded constant is
    /// normalized.
    pub fn set_range(&mut self, index: SlotIndex, interval: Interval, modular: bool) {
        let range = if modular {
            OutputRange::modular(interval)
        } else {
            OutputRange::clamped(interval)
        };
        self.slots.set_range(index, range);
    }

    /// Set a slot's output range.
    pub fn set_output_range(&mut self, index: SlotIndex, range: OutputRange) {
        self.slots.set_range(index, range);
    }

    /// A slot's output range.
    pub fn output_range(&self, index: SlotIndex) -> OutputRange {
        self.slots.range(index)
    }

    // ── Curves ─────────────────────────────────────────────────

    /// Start playing `curve` on a slot from `start_position`.
    ///
    /// The covering segment is loaded and evaluated immediately, so
    /// [`current_value`](Self::current_value) is valid on return.
    ///
    /// A `start_position` before the curve start snaps to the start of the
    /// first segment: [`current_position`](Self::current_position) then
    /// reports the curve start, not `start_position`.
    pub fn assign_curve(
        &mut self,
        index: SlotIndex,
        curve: &'c dyn SegmentedCurve,
        start_position: f32,
        repeat: bool,
    ) {
        let change = tracker::assign_curve(&mut self.slots, index, curve, start_position, repeat);
        evaluate_slot(&mut self.slots, index);
        trace!("assign slot {index} at {start_position}: {change:?}");
    }

    /// Make a slot inert. Its output holds the last value.
    pub fn clear_curve(&mut self, index: SlotIndex) {
        tracker::clear_curve(&mut self.slots, index);
    }

    // ── Frames ─────────────────────────────────────────────────

    /// Advance every slot by `delta` and re-evaluate all outputs.
    ///
    /// `delta` must be finite and non-negative (debug-checked).
    ///
    /// # Panics
    ///
    /// Under [`Strategy::Verify`], if the alternate kernel disagrees with
    /// the reference.
    pub fn advance_frame(&mut self, delta: f32) -> FrameMetrics {
        debug_assert!(
            delta.is_finite() && delta >= 0.0,
            "frame delta must be finite and non-negative, got {delta}"
        );
        let frame_start = Instant::now();
        self.frame = FrameId(self.frame.0 + 1);
        let mut metrics = FrameMetrics {
            frame: self.frame,
            slots: u32::try_from(self.slots.len()).unwrap_or(u32::MAX),
            delta,
            ..FrameMetrics::default()
        };

        // 1. Bulk advance.
        let t = Instant::now();
        self.dispatcher
            .advance(delta, self.slots.advance_columns(), &mut self.scratch);
        metrics.advance_us = t.elapsed().as_micros() as u64;
        metrics.expired = self.scratch.expired.len() as u32;

        // 2. Re-initialize expired slots.
        let t = Instant::now();
        for &index in &self.scratch.expired {
            let position = tracker::position(&self.slots, index);
            match tracker::ensure_segment(&mut self.slots, index, position) {
                SegmentChange::Loaded(_) => metrics.reloaded += 1,
                SegmentChange::Wrapped(_) => metrics.wrapped += 1,
                SegmentChange::Finished => metrics.finished += 1,
                SegmentChange::Inert | SegmentChange::Unchanged => {}
            }
        }
        metrics.reinit_us = t.elapsed().as_micros() as u64;

        // 3. Bulk evaluate.
        let t = Instant::now();
        self.dispatcher.evaluate(self.slots.evaluate_columns());
        metrics.evaluate_us = t.elapsed().as_micros() as u64;

        metrics.total_us = frame_start.elapsed().as_micros() as u64;
        trace!(
            "frame {}: slots={} expired={} reloaded={} wrapped={} finished={} total_us={}",
            metrics.frame,
            metrics.slots,
            metrics.expired,
            metrics.reloaded,
            metrics.wrapped,
            metrics.finished,
            metrics.total_us
        );
        self.last_metrics = metrics;
        metrics
    }

    // ── Readers ────────────────────────────────────────────────

    /// Returns `true` if `index` is in range and has a curve.
    pub fn is_active(&self, index: SlotIndex) -> bool {
        self.slots.is_active(index)
    }

    /// Global playback position of a slot.
    pub fn current_position(&self, index: SlotIndex) -> f32 {
        tracker::position(&self.slots, index)
    }

    /// Last evaluated output of a slot.
    pub fn current_value(&self, index: SlotIndex) -> f32 {
        self.slots.value(index)
    }

    /// Slope of the loaded cubic at the slot's cursor.
    pub fn current_derivative(&self, index: SlotIndex) -> f32 {
        self.slots
            .cubic(index)
            .derivative(self.slots.cursor(index))
    }

    /// The loaded segment, or `None` for inert, unloaded and finished slots.
    pub fn current_segment(&self, index: SlotIndex) -> Option<SegmentId> {
        self.slots.source(index).segment.segment()
    }

    /// Returns `true` if the slot wraps at the end of its curve.
    pub fn is_repeating(&self, index: SlotIndex) -> bool {
        self.slots.source(index).repeat
    }

    /// The whole output column, indexed by slot.
    pub fn values(&self) -> &[f32] {
        self.slots.values()
    }

    /// The kernel strategy.
    pub fn strategy(&self) -> Strategy {
        self.dispatcher.strategy()
    }

    /// Metrics of the most recent frame.
    pub fn last_metrics(&self) -> &FrameMetrics {
        &self.last_metrics
    }

    /// Number of frames advanced so far.
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// Heap memory held by slot columns and scratch buffers, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.slots.memory_bytes() + self.scratch.memory_bytes() + self.dispatcher.memory_bytes()
    }
}
