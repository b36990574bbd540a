//! Bulk cursor advance and expiry detection.
//!
//! Both strategies add one delta to every cursor and report the slots
//! whose cursor now exceeds its segment length, in ascending order:
//!
//! - [`advance_single_pass`]: add, test and push in one loop.
//! - [`advance_masked`]: [`generate_mask`] writes a branch-free
//!   `0xFF`/`0x00` byte per slot, then [`compact_mask`] turns the mask
//!   into an index list without data-dependent branches.
//!
//! The two must agree exactly; the dispatcher's verification mode relies
//! on it.

use glide_core::SlotIndex;

use crate::slots::AdvanceColumns;

/// Reusable per-frame buffers for the advancer.
///
/// Owned by the evaluator and reused across frames so the hot path does
/// not allocate once the buffers have grown to the slot count.
#[derive(Clone, Debug, Default)]
pub struct FrameScratch {
    /// Slots whose cursor expired during the last advance, ascending.
    pub expired: Vec<SlotIndex>,
    /// Expiry mask, one byte per slot. Only the masked strategy uses it.
    pub mask: Vec<u8>,
}

impl FrameScratch {
    /// Create empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Heap memory held by the buffers, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.expired.capacity() * std::mem::size_of::<SlotIndex>() + self.mask.capacity()
    }
}

/// Mask byte for one cursor: `0xFF` if expired, `0x00` otherwise.
#[inline(always)]
pub fn expiry_mask(cursor: f32, length: f32) -> u8 {
    u8::from(cursor > length).wrapping_neg()
}

/// Advance every cursor by `delta` and push expired slots to `expired`.
///
/// `expired` is cleared first.
pub fn advance_single_pass(delta: f32, columns: AdvanceColumns<'_>, expired: &mut Vec<SlotIndex>) {
    expired.clear();
    for (i, (cursor, &length)) in columns
        .cursors
        .iter_mut()
        .zip(columns.lengths)
        .enumerate()
    {
        *cursor += delta;
        if *cursor > length {
            expired.push(SlotIndex(i as u32));
        }
    }
}

/// Advance every cursor by `delta` and write one expiry byte per slot.
///
/// `mask` is resized to the slot count.
pub fn generate_mask(delta: f32, columns: AdvanceColumns<'_>, mask: &mut Vec<u8>) {
    mask.clear();
    mask.resize(columns.cursors.len(), 0);
    for ((cursor, &length), m) in columns
        .cursors
        .iter_mut()
        .zip(columns.lengths)
        .zip(mask.iter_mut())
    {
        *cursor += delta;
        *m = expiry_mask(*cursor, length);
    }
}

/// Compact an expiry mask into the ascending list of set positions.
///
/// Every position is written unconditionally and the output length only
/// advances past set bytes, so the loop has no data-dependent branch.
pub fn compact_mask(mask: &[u8], expired: &mut Vec<SlotIndex>) {
    expired.clear();
    expired.resize(mask.len(), SlotIndex(0));
    let mut count = 0usize;
    for (i, &m) in mask.iter().enumerate() {
        // count <= i < mask.len(), so the write is always in bounds.
        expired[count] = SlotIndex(i as u32);
        count += usize::from(m != 0);
    }
    expired.truncate(count);
}

/// Mask-then-compact advance.
pub fn advance_masked(delta: f32, columns: AdvanceColumns<'_>, scratch: &mut FrameScratch) {
    generate_mask(delta, columns, &mut scratch.mask);
    compact_mask(&scratch.mask, &mut scratch.expired);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cols<'a>(cursors: &'a mut [f32], lengths: &'a [f32]) -> AdvanceColumns<'a> {
        AdvanceColumns { cursors, lengths }
    }

    // ── Single pass ────────────────────────────────────────────

    #[test]
    fn single_pass_reports_strictly_exceeding_cursors() {
        let mut cursors = [0.0, 4.0, 4.5, 9.0];
        let lengths = [5.0, 5.0, 5.0, 5.0];
        let mut expired = vec![SlotIndex(99)];
        advance_single_pass(0.5, cols(&mut cursors, &lengths), &mut expired);
        assert_eq!(cursors, [0.5, 4.5, 5.0, 9.5]);
        // 5.0 is not > 5.0.
        assert_eq!(expired, vec![SlotIndex(3)]);
    }

    #[test]
    fn zero_delta_still_reports_already_expired() {
        let mut cursors = [6.0, 1.0];
        let lengths = [5.0, 5.0];
        let mut expired = Vec::new();
        advance_single_pass(0.0, cols(&mut cursors, &lengths), &mut expired);
        assert_eq!(expired, vec![SlotIndex(0)]);
    }

    #[test]
    fn infinite_length_never_expires() {
        let mut cursors = [1.0e30];
        let lengths = [f32::INFINITY];
        let mut scratch = FrameScratch::new();
        advance_masked(1.0e30, cols(&mut cursors, &lengths), &mut scratch);
        assert!(scratch.expired.is_empty());
    }

    #[test]
    fn empty_columns() {
        let mut scratch = FrameScratch::new();
        advance_masked(1.0, cols(&mut [], &[]), &mut scratch);
        assert!(scratch.expired.is_empty());
        assert!(scratch.mask.is_empty());
    }

    // ── Mask then compact ──────────────────────────────────────

    #[test]
    fn mask_bytes_are_all_or_nothing() {
        assert_eq!(expiry_mask(2.0, 1.0), 0xFF);
        assert_eq!(expiry_mask(1.0, 1.0), 0x00);
        assert_eq!(expiry_mask(f32::NAN, 1.0), 0x00);
    }

    #[test]
    fn compact_preserves_order() {
        let mask = [0xFF, 0, 0, 0xFF, 0xFF, 0, 0xFF];
        let mut expired = Vec::new();
        compact_mask(&mask, &mut expired);
        assert_eq!(
            expired,
            vec![SlotIndex(0), SlotIndex(3), SlotIndex(4), SlotIndex(6)]
        );
    }

    #[test]
    fn compact_all_clear_and_all_set() {
        let mut expired = Vec::new();
        compact_mask(&[0; 5], &mut expired);
        assert!(expired.is_empty());
        compact_mask(&[0xFF; 3], &mut expired);
        assert_eq!(expired, vec![SlotIndex(0), SlotIndex(1), SlotIndex(2)]);
    }

    #[test]
    fn scratch_reuse_does_not_leak_previous_frame() {
        let mut scratch = FrameScratch::new();
        let mut cursors = [10.0, 10.0, 10.0];
        let lengths = [1.0, 1.0, 1.0];
        advance_masked(0.0, cols(&mut cursors, &lengths), &mut scratch);
        assert_eq!(scratch.expired.len(), 3);

        let mut cursors = [0.0];
        let lengths = [1.0];
        advance_masked(0.5, cols(&mut cursors, &lengths), &mut scratch);
        assert!(scratch.expired.is_empty());
        assert_eq!(scratch.mask.len(), 1);
    }

    // ── Strategy equivalence ───────────────────────────────────

    fn slot_strategy() -> impl Strategy<Value = (f32, f32)> {
        let length = prop_oneof![
            Just(0.0f32),
            0.01f32..100.0,
            Just(f32::INFINITY),
        ];
        (0.0f32..100.0, length)
    }

    proptest! {
        #[test]
        fn single_pass_and_masked_agree(
            slots in prop::collection::vec(slot_strategy(), 0..200),
            delta in prop_oneof![Just(0.0f32), 0.0f32..50.0],
        ) {
            let lengths: Vec<f32> = slots.iter().map(|s| s.1).collect();
            let mut a: Vec<f32> = slots.iter().map(|s| s.0).collect();
            let mut b = a.clone();

            let mut single = Vec::new();
            advance_single_pass(delta, cols(&mut a, &lengths), &mut single);
            let mut scratch = FrameScratch::new();
            advance_masked(delta, cols(&mut b, &lengths), &mut scratch);

            prop_assert_eq!(&single, &scratch.expired);
            let a_bits: Vec<u32> = a.iter().map(|x| x.to_bits()).collect();
            let b_bits: Vec<u32> = b.iter().map(|x| x.to_bits()).collect();
            prop_assert_eq!(a_bits, b_bits);
            prop_assert!(single.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
