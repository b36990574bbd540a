//! Columnar storage of per-slot playback state.
//!
//! [`SlotTable`] owns one column per piece of playback state and keeps
//! them in lockstep: [`resize`](SlotTable::resize) and
//! [`relocate`](SlotTable::relocate) are the only operations that touch
//! the layout, and both act on every column at once.
//!
//! ```text
//! SlotTable<'c>
//! ├── sources  [Source<'c>]    curve ref, loaded segment, repeat flag
//! ├── ranges   [OutputRange]   output interval + modular flag
//! ├── cursors  [f32]           local_x within the loaded segment
//! ├── lengths  [f32]           valid length of the loaded segment
//! ├── cubics   [Cubic]         polynomial for the loaded segment
//! └── values   [f32]           last evaluated output
//! ```
//!
//! Kernels never see the table itself; they receive
//! [`AdvanceColumns`] and [`EvaluateColumns`] views over exactly the
//! columns they read and write.

use std::fmt;

use glide_core::{Cubic, OutputRange, SegmentId, SegmentedCurve, SlotIndex};

/// Which segment of its curve a slot has loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SegmentState {
    /// Nothing loaded yet; the next lookup searches from the first segment.
    #[default]
    Unloaded,
    /// The given segment is loaded into the slot's cubic.
    Loaded(SegmentId),
    /// Playback ran past the end of a non-repeating curve. The slot holds
    /// the curve's end value and never expires again.
    Finished,
}

impl SegmentState {
    /// The loaded segment, if any.
    pub fn segment(self) -> Option<SegmentId> {
        match self {
            Self::Loaded(s) => Some(s),
            _ => None,
        }
    }
}

/// Playback source of one slot: the borrowed curve and where on it the
/// slot currently is.
#[derive(Clone, Copy, Default)]
pub struct Source<'c> {
    /// The curve being played back. `None` means the slot is inert.
    pub curve: Option<&'c dyn SegmentedCurve>,
    /// The loaded segment.
    pub segment: SegmentState,
    /// Wrap to the curve start when playback runs past the end.
    pub repeat: bool,
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("active", &self.curve.is_some())
            .field("segment", &self.segment)
            .field("repeat", &self.repeat)
            .finish()
    }
}

/// Mutable view over the columns the bulk advancer touches.
pub struct AdvanceColumns<'a> {
    /// Segment-local cursors, advanced in place.
    pub cursors: &'a mut [f32],
    /// Valid length of each slot's loaded segment.
    pub lengths: &'a [f32],
}

/// Mutable view over the columns the bulk evaluator touches.
pub struct EvaluateColumns<'a> {
    /// Segment polynomials. Modular slots have their constant adjusted.
    pub cubics: &'a mut [Cubic],
    /// Segment-local cursors.
    pub cursors: &'a [f32],
    /// Output range of each slot.
    pub ranges: &'a [OutputRange],
    /// Output column, overwritten for every slot.
    pub values: &'a mut [f32],
}

impl fmt::Debug for SlotTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotTable")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Structure-of-arrays table of slot playback state.
///
/// Every column always has length [`len()`](Self::len). Curves are
/// borrowed for `'c`, so the borrow checker guarantees they outlive every
/// slot that plays them.
#[derive(Default)]
pub struct SlotTable<'c> {
    sources: Vec<Source<'c>>,
    ranges: Vec<OutputRange>,
    cursors: Vec<f32>,
    lengths: Vec<f32>,
    cubics: Vec<Cubic>,
    values: Vec<f32>,
}

impl<'c> SlotTable<'c> {
    /// Largest slot count addressable by a [`SlotIndex`].
    pub const MAX_SLOTS: usize = u32::MAX as usize;

    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with `len` inert slots.
    pub fn with_len(len: usize) -> Self {
        let mut table = Self::new();
        table.resize(len);
        table
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if the table has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Grow or shrink every column to `len` slots.
    ///
    /// New slots are inert, with zeroed cursor state, a zero cubic, a zero
    /// output and the identity output range. Shrinking silently discards
    /// the truncated slots. `len` saturates at [`MAX_SLOTS`](Self::MAX_SLOTS)
    /// so every row stays addressable by a [`SlotIndex`].
    pub fn resize(&mut self, len: usize) {
        let len = Self::capped_len(len);
        self.sources.resize(len, Source::default());
        self.ranges.resize(len, OutputRange::IDENTITY);
        self.cursors.resize(len, 0.0);
        self.lengths.resize(len, 0.0);
        self.cubics.resize(len, Cubic::default());
        self.values.resize(len, 0.0);
    }

    /// `len` saturated to [`MAX_SLOTS`](Self::MAX_SLOTS).
    #[inline]
    pub fn capped_len(len: usize) -> usize {
        len.min(Self::MAX_SLOTS)
    }

    /// Copy every column of slot `src` into slot `dst`.
    ///
    /// Used for caller-driven compaction after removing slots. The source
    /// slot is left untouched: clearing it is the caller's job.
    pub fn relocate(&mut self, src: SlotIndex, dst: SlotIndex) {
        let (s, d) = (src.get(), dst.get());
        debug_assert!(s < self.len(), "relocate source {src} out of range");
        debug_assert!(d < self.len(), "relocate destination {dst} out of range");
        self.sources[d] = self.sources[s];
        self.ranges[d] = self.ranges[s];
        self.cursors[d] = self.cursors[s];
        self.lengths[d] = self.lengths[s];
        self.cubics[d] = self.cubics[s];
        self.values[d] = self.values[s];
    }

    /// Returns `true` if `index` is in range and has a curve.
    #[inline]
    pub fn is_active(&self, index: SlotIndex) -> bool {
        self.sources
            .get(index.get())
            .is_some_and(|s| s.curve.is_some())
    }

    /// Overwrite a slot's output range. Stored outputs are not recomputed.
    #[inline]
    pub fn set_range(&mut self, index: SlotIndex, range: OutputRange) {
        self.ranges[index.get()] = range;
    }

    /// Playback source of a slot.
    #[inline]
    pub fn source(&self, index: SlotIndex) -> &Source<'c> {
        &self.sources[index.get()]
    }

    /// Mutable playback source of a slot.
    #[inline]
    pub fn source_mut(&mut self, index: SlotIndex) -> &mut Source<'c> {
        &mut self.sources[index.get()]
    }

    /// Output range of a slot.
    #[inline]
    pub fn range(&self, index: SlotIndex) -> OutputRange {
        self.ranges[index.get()]
    }

    /// Cursor (`local_x`) of a slot.
    #[inline]
    pub fn cursor(&self, index: SlotIndex) -> f32 {
        self.cursors[index.get()]
    }

    /// Valid length of a slot's loaded segment.
    #[inline]
    pub fn length(&self, index: SlotIndex) -> f32 {
        self.lengths[index.get()]
    }

    /// Cubic of a slot's loaded segment.
    #[inline]
    pub fn cubic(&self, index: SlotIndex) -> &Cubic {
        &self.cubics[index.get()]
    }

    /// Last evaluated output of a slot.
    #[inline]
    pub fn value(&self, index: SlotIndex) -> f32 {
        self.values[index.get()]
    }

    /// Replace a slot's segment state: cursor, length and cubic together.
    pub fn load(&mut self, index: SlotIndex, cursor: f32, length: f32, cubic: Cubic) {
        let i = index.get();
        self.cursors[i] = cursor;
        self.lengths[i] = length;
        self.cubics[i] = cubic;
    }

    /// Move a slot's cursor without reloading its segment.
    #[inline]
    pub fn set_cursor(&mut self, index: SlotIndex, cursor: f32) {
        self.cursors[index.get()] = cursor;
    }

    /// The whole output column.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// The whole cursor column.
    #[inline]
    pub fn cursors(&self) -> &[f32] {
        &self.cursors
    }

    /// The whole segment-length column.
    #[inline]
    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// The whole cubic column.
    #[inline]
    pub fn cubics(&self) -> &[Cubic] {
        &self.cubics
    }

    /// The whole output-range column.
    #[inline]
    pub fn ranges(&self) -> &[OutputRange] {
        &self.ranges
    }

    /// View over the columns the bulk advancer mutates.
    pub fn advance_columns(&mut self) -> AdvanceColumns<'_> {
        AdvanceColumns {
            cursors: &mut self.cursors,
            lengths: &self.lengths,
        }
    }

    /// View over the columns the bulk evaluator mutates.
    pub fn evaluate_columns(&mut self) -> EvaluateColumns<'_> {
        EvaluateColumns {
            cubics: &mut self.cubics,
            cursors: &self.cursors,
            ranges: &self.ranges,
            values: &mut self.values,
        }
    }

    /// Single-slot view for evaluating one index in place.
    pub(crate) fn evaluate_one(&mut self, index: SlotIndex) -> (&mut Cubic, f32, OutputRange, &mut f32) {
        let i = index.get();
        (
            &mut self.cubics[i],
            self.cursors[i],
            self.ranges[i],
            &mut self.values[i],
        )
    }

    /// Heap memory held by all columns, in bytes.
    pub fn memory_bytes(&self) -> usize {
        use std::mem::size_of;
        self.sources.capacity() * size_of::<Source<'c>>()
            + self.ranges.capacity() * size_of::<OutputRange>()
            + self.cursors.capacity() * size_of::<f32>()
            + self.lengths.capacity() * size_of::<f32>()
            + self.cubics.capacity() * size_of::<Cubic>()
            + self.values.capacity() * size_of::<f32>()
    }

    #[cfg(test)]
    pub(crate) fn column_lengths(&self) -> [usize; 6] {
        [
            self.sources.len(),
            self.ranges.len(),
            self.cursors.len(),
            self.lengths.len(),
            self.cubics.len(),
            self.values.len(),
        ]
    }
}
