//! Bulk spline evaluation engine.
//!
//! Advances and samples thousands of independent spline playback slots
//! per frame. State lives in a structure-of-arrays [`SlotTable`]; each
//! frame runs a bulk cursor advance, re-initializes the slots that moved
//! onto a new curve segment, and bulk-evaluates every slot's cubic into
//! the output column.
//!
//! The bulk passes go through a [`Dispatcher`] that runs the portable
//! [`ReferenceKernel`], the chunked [`VectorizedKernel`] (or any other
//! [`BulkKernel`]), or both with bit-exact cross-checking.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advance;
pub mod config;
pub mod dispatch;
pub mod evaluate;
pub mod evaluator;
pub mod kernel;
pub mod metrics;
pub mod slots;
pub mod tracker;
pub mod verify;

pub use advance::FrameScratch;
pub use config::{ConfigError, EvaluatorConfig, Strategy};
pub use dispatch::Dispatcher;
pub use evaluator::BulkSplineEvaluator;
pub use kernel::{BulkKernel, ReferenceKernel, VectorizedKernel, LANES};
pub use metrics::FrameMetrics;
pub use slots::{AdvanceColumns, EvaluateColumns, SegmentState, SlotTable};
pub use tracker::SegmentChange;
pub use verify::Mismatch;
