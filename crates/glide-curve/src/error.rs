//! Error types for curve construction.

use std::fmt;

/// Errors arising from building a curve.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Attempted to build a curve with no segments.
    EmptyCurve,
    /// A segment width is zero, negative, or not finite.
    InvalidWidth {
        /// Position of the segment in the build order.
        segment: usize,
        /// The rejected width.
        width: f32,
    },
    /// The curve start position is not finite.
    InvalidStart {
        /// The rejected start.
        start: f32,
    },
    /// More segments than a [`SegmentId`](glide_core::SegmentId) can name.
    TooManySegments {
        /// Requested segment count.
        count: usize,
    },
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCurve => write!(f, "curve must have at least one segment"),
            Self::InvalidWidth { segment, width } => {
                write!(
                    f,
                    "segment {segment} width must be finite and positive, got {width}"
                )
            }
            Self::InvalidStart { start } => {
                write!(f, "curve start must be finite, got {start}")
            }
            Self::TooManySegments { count } => {
                write!(f, "segment count {count} exceeds u32::MAX")
            }
        }
    }
}

impl std::error::Error for CurveError {}
