//! Segmented cubic curves for the Glide bulk spline engine.
//!
//! This crate provides concrete implementations of the
//! [`SegmentedCurve`](glide_core::SegmentedCurve) contract that the engine
//! samples, along with a compliance module that checks any implementation
//! against that contract.
//!
//! # Curves
//!
//! - [`PiecewiseCubic`]: consecutive segments, each described either by
//!   endpoint values and slopes ([`CubicInit`](glide_core::CubicInit)) or by
//!   explicit polynomial coefficients.
//!
//! Curve fitting from control points is out of scope; callers (or asset
//! loaders) supply the per-segment descriptions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compliance;
pub mod error;
pub mod piecewise;

pub use error::CurveError;
pub use piecewise::{PiecewiseCubic, PiecewiseCubicBuilder, SegmentShape};
