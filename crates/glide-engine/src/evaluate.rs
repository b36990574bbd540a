//! Scalar evaluation of segment cubics into the output column.

use glide_core::{Cubic, OutputRange, SlotIndex};

use crate::slots::{EvaluateColumns, SlotTable};

/// Evaluate one cubic at `x` and bring the result into `range`.
///
/// For a modular range the adjustment is also added to the cubic's
/// constant term, so the next evaluation of the same segment starts out
/// already normalized. The constant is shifted on every modular
/// evaluation, including when the adjustment is zero.
#[inline]
pub fn evaluate_index(cubic: &mut Cubic, x: f32, range: OutputRange) -> f32 {
    let raw = cubic.evaluate(x);
    let (value, adjustment) = range.apply(raw);
    if range.modular {
        cubic.shift(adjustment);
        debug_assert!(
            range.interval.contains(value),
            "modular value {value} (raw {raw}) outside [{}, {}]",
            range.interval.start(),
            range.interval.end()
        );
    }
    value
}

/// Evaluate every slot in order.
pub fn evaluate_all(columns: EvaluateColumns<'_>) {
    let EvaluateColumns {
        cubics,
        cursors,
        ranges,
        values,
    } = columns;
    for (((cubic, &x), &range), value) in cubics
        .iter_mut()
        .zip(cursors)
        .zip(ranges)
        .zip(values.iter_mut())
    {
        *value = evaluate_index(cubic, x, range);
    }
}

/// Evaluate a single slot in place.
pub fn evaluate_slot(slots: &mut SlotTable<'_>, index: SlotIndex) {
    let (cubic, x, range, value) = slots.evaluate_one(index);
    *value = evaluate_index(cubic, x, range);
}
