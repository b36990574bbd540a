//! Core types and traits for the Glide bulk spline engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value-level building blocks shared by every other crate in the
//! workspace: slot and segment identifiers, the range normalizer, the
//! cubic segment polynomial, the curve collaborator contract, and the
//! core error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cubic;
pub mod curve;
pub mod error;
pub mod id;
pub mod range;

pub use cubic::{Cubic, CubicInit};
pub use curve::SegmentedCurve;
pub use error::RangeError;
pub use id::{FrameId, SegmentId, SlotIndex};
pub use range::{Interval, OutputRange};
