//! Error types for constructing core value types.
//!
//! The per-frame paths of the engine never return errors; these only
//! surface when a caller builds an [`Interval`](crate::Interval) or
//! [`OutputRange`](crate::OutputRange) from untrusted input.

use std::error::Error;
use std::fmt;

/// Errors from [`Interval::try_new`](crate::Interval::try_new) and
/// [`OutputRange::try_modular`](crate::OutputRange::try_modular).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeError {
    /// One of the bounds is NaN.
    NanBound,
    /// The start bound is greater than the end bound.
    Inverted {
        /// The requested start.
        start: f32,
        /// The requested end.
        end: f32,
    },
    /// A modular range needs a finite, non-zero length to wrap around.
    DegenerateModular {
        /// The length of the rejected interval.
        length: f32,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NanBound => write!(f, "interval bound is NaN"),
            Self::Inverted { start, end } => {
                write!(f, "interval start {start} is greater than end {end}")
            }
            Self::DegenerateModular { length } => {
                write!(
                    f,
                    "modular range needs a finite non-zero length, got {length}"
                )
            }
        }
    }
}

impl Error for RangeError {}
