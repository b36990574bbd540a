//! Strongly-typed identifiers for slots, segments and frames.

use std::fmt;

/// Dense, zero-based handle into the slot store.
///
/// Valid in `[0, num_slots)`. Stable across frames; a slot only moves when
/// the caller relocates it explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub u32);

impl SlotIndex {
    /// The index as a `usize`, for column access.
    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies one segment of a curve.
///
/// `SegmentId(n)` is the n-th segment in increasing position order, so
/// comparing ids compares positions along the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u32);

impl SegmentId {
    /// The first segment of every curve.
    pub const FIRST: SegmentId = SegmentId(0);

    /// The segment after this one.
    #[inline]
    pub fn next(self) -> SegmentId {
        SegmentId(self.0 + 1)
    }

    /// The id as a `usize`, for indexing segment tables.
    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SegmentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing frame counter.
///
/// Incremented each time the evaluator advances one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FrameId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
