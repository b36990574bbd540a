//! Glide: bulk spline playback for large sets of animated scalar values.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Glide sub-crates. For most users, adding `glide` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use glide::prelude::*;
//!
//! // Ramp 0 -> 5 over [0, 5), then 5 -> 0 over [5, 10).
//! let curve = PiecewiseCubic::builder(0.0)
//!     .linear(0.0, 5.0, 5.0)
//!     .linear(5.0, 0.0, 5.0)
//!     .build()
//!     .unwrap();
//!
//! let config = EvaluatorConfig::default()
//!     .with_strategy(Strategy::Vectorized)
//!     .with_initial_slots(1);
//! let mut evaluator = BulkSplineEvaluator::new(config).unwrap();
//! evaluator.assign_curve(SlotIndex(0), &curve, 0.0, false);
//!
//! evaluator.advance_frame(6.0);
//! assert_eq!(evaluator.current_position(SlotIndex(0)), 6.0);
//! assert!((evaluator.current_value(SlotIndex(0)) - 4.0).abs() < 1e-5);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `glide-core` | IDs, intervals, output ranges, cubics, the curve trait |
//! | [`curve`] | `glide-curve` | Piecewise cubic curves and contract compliance checks |
//! | [`engine`] | `glide-engine` | Slot table, kernels, dispatcher and the evaluator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`glide-core`).
///
/// Contains slot and segment identifiers, [`types::Interval`],
/// [`types::OutputRange`], [`types::Cubic`] and the
/// [`types::SegmentedCurve`] trait.
pub use glide_core as types;

/// Segmented cubic curves (`glide-curve`).
///
/// [`curve::PiecewiseCubic`] is the stock curve; [`curve::compliance`]
/// checks custom [`types::SegmentedCurve`] implementations.
pub use glide_curve as curve;

/// The bulk evaluation engine (`glide-engine`).
///
/// [`engine::BulkSplineEvaluator`] drives frames; [`engine::BulkKernel`]
/// is the extension point for custom backends.
pub use glide_engine as engine;

/// Common imports for typical Glide usage.
///
/// ```rust
/// use glide::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use glide_core::{
        Cubic, CubicInit, FrameId, Interval, OutputRange, SegmentId, SegmentedCurve, SlotIndex,
    };

    // Curves
    pub use glide_curve::{PiecewiseCubic, SegmentShape};

    // Errors
    pub use glide_core::RangeError;
    pub use glide_curve::CurveError;
    pub use glide_engine::ConfigError;

    // Engine
    pub use glide_engine::{
        BulkKernel, BulkSplineEvaluator, EvaluatorConfig, FrameMetrics, Strategy,
    };
}
