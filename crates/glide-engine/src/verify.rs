//! Bit-exact comparison of reference and alternate kernel results.
//!
//! Each check returns the first [`Mismatch`] it finds. The dispatcher
//! turns a mismatch into a logged, fatal panic.

use std::error::Error;
use std::fmt;

use glide_core::{Cubic, SlotIndex};

/// The first difference found between two kernels' results.
#[derive(Clone, Debug, PartialEq)]
pub enum Mismatch {
    /// The expired lists have different lengths.
    ExpiredCount {
        /// Entries produced by the reference kernel.
        reference: usize,
        /// Entries produced by the alternate kernel.
        alternate: usize,
    },
    /// The expired lists differ at `position`.
    ExpiredIndex {
        /// Position in the expired list.
        position: usize,
        /// Slot reported by the reference kernel.
        reference: SlotIndex,
        /// Slot reported by the alternate kernel.
        alternate: SlotIndex,
    },
    /// A cursor differs after the advance.
    Cursor {
        /// The slot.
        slot: SlotIndex,
        /// Reference cursor.
        reference: f32,
        /// Alternate cursor.
        alternate: f32,
    },
    /// An output value differs after evaluation.
    Value {
        /// The slot.
        slot: SlotIndex,
        /// Reference value.
        reference: f32,
        /// Alternate value.
        alternate: f32,
    },
    /// Cubic coefficients differ after evaluation.
    Coefficients {
        /// The slot.
        slot: SlotIndex,
        /// Reference coefficients.
        reference: [f32; 4],
        /// Alternate coefficients.
        alternate: [f32; 4],
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpiredCount {
                reference,
                alternate,
            } => write!(
                f,
                "expired count differs: reference {reference}, alternate {alternate}"
            ),
            Self::ExpiredIndex {
                position,
                reference,
                alternate,
            } => write!(
                f,
                "expired[{position}] differs: reference slot {reference}, alternate slot {alternate}"
            ),
            Self::Cursor {
                slot,
                reference,
                alternate,
            } => write!(
                f,
                "cursor of slot {slot} differs: reference {reference:e} ({:#010x}), alternate {alternate:e} ({:#010x})",
                reference.to_bits(),
                alternate.to_bits()
            ),
            Self::Value {
                slot,
                reference,
                alternate,
            } => write!(
                f,
                "value of slot {slot} differs: reference {reference:e} ({:#010x}), alternate {alternate:e} ({:#010x})",
                reference.to_bits(),
                alternate.to_bits()
            ),
            Self::Coefficients {
                slot,
                reference,
                alternate,
            } => write!(
                f,
                "cubic of slot {slot} differs: reference {reference:?}, alternate {alternate:?}"
            ),
        }
    }
}

impl Error for Mismatch {}

fn first_float_mismatch(reference: &[f32], alternate: &[f32]) -> Option<(SlotIndex, f32, f32)> {
    debug_assert_eq!(reference.len(), alternate.len());
    reference
        .iter()
        .zip(alternate)
        .position(|(a, b)| a.to_bits() != b.to_bits())
        .map(|i| (SlotIndex(i as u32), reference[i], alternate[i]))
}

/// Compare the expired lists and cursor columns of an advance.
pub fn compare_advance(
    reference_expired: &[SlotIndex],
    alternate_expired: &[SlotIndex],
    reference_cursors: &[f32],
    alternate_cursors: &[f32],
) -> Result<(), Mismatch> {
    if reference_expired.len() != alternate_expired.len() {
        return Err(Mismatch::ExpiredCount {
            reference: reference_expired.len(),
            alternate: alternate_expired.len(),
        });
    }
    if let Some(position) = reference_expired
        .iter()
        .zip(alternate_expired)
        .position(|(a, b)| a != b)
    {
        return Err(Mismatch::ExpiredIndex {
            position,
            reference: reference_expired[position],
            alternate: alternate_expired[position],
        });
    }
    if let Some((slot, reference, alternate)) =
        first_float_mismatch(reference_cursors, alternate_cursors)
    {
        return Err(Mismatch::Cursor {
            slot,
            reference,
            alternate,
        });
    }
    Ok(())
}

/// Compare the output values and cubic columns of an evaluation.
pub fn compare_evaluate(
    reference_values: &[f32],
    alternate_values: &[f32],
    reference_cubics: &[Cubic],
    alternate_cubics: &[Cubic],
) -> Result<(), Mismatch> {
    if let Some((slot, reference, alternate)) =
        first_float_mismatch(reference_values, alternate_values)
    {
        return Err(Mismatch::Value {
            slot,
            reference,
            alternate,
        });
    }
    debug_assert_eq!(reference_cubics.len(), alternate_cubics.len());
    if let Some(i) = reference_cubics
        .iter()
        .zip(alternate_cubics)
        .position(|(a, b)| !a.bits_eq(b))
    {
        return Err(Mismatch::Coefficients {
            slot: SlotIndex(i as u32),
            reference: reference_cubics[i].coeffs(),
            alternate: alternate_cubics[i].coeffs(),
        });
    }
    Ok(())
}
