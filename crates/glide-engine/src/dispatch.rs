//! Kernel selection and the verification harness.
//!
//! The [`Dispatcher`] owns the reference kernel and one alternate kernel
//! and routes each bulk pass according to its [`Strategy`]. Under
//! [`Strategy::Verify`] the reference runs on the live columns and the
//! alternate on shadow copies; the results are compared bit for bit and
//! the first difference aborts the frame with a panic.

use std::fmt;

use glide_core::Cubic;
use log::error;

use crate::advance::FrameScratch;
use crate::config::Strategy;
use crate::kernel::{BulkKernel, ReferenceKernel, VectorizedKernel};
use crate::slots::{AdvanceColumns, EvaluateColumns};
use crate::verify::{compare_advance, compare_evaluate, Mismatch};

/// Shadow state the alternate kernel runs on under `Verify`.
#[derive(Default)]
struct Shadow {
    cursors: Vec<f32>,
    cubics: Vec<Cubic>,
    values: Vec<f32>,
    scratch: FrameScratch,
}

/// Routes bulk passes to the configured kernel.
pub struct Dispatcher {
    strategy: Strategy,
    reference: ReferenceKernel,
    alternate: Box<dyn BulkKernel>,
    shadow: Shadow,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("strategy", &self.strategy)
            .field("alternate", &self.alternate.name())
            .finish()
    }
}

impl Dispatcher {
    /// Dispatcher with [`VectorizedKernel`] as the alternate.
    pub fn new(strategy: Strategy) -> Self {
        Self::with_alternate(strategy, Box::new(VectorizedKernel))
    }

    /// Dispatcher with a caller-supplied alternate kernel, e.g. a
    /// platform-specific backend being certified under `Verify`.
    pub fn with_alternate(strategy: Strategy, alternate: Box<dyn BulkKernel>) -> Self {
        Self {
            strategy,
            reference: ReferenceKernel,
            alternate,
            shadow: Shadow::default(),
        }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Name of the kernel whose results land in the live columns.
    pub fn active_kernel(&self) -> &'static str {
        match self.strategy {
            Strategy::Vectorized => self.alternate.name(),
            Strategy::Reference | Strategy::Verify => self.reference.name(),
        }
    }

    /// Name of the alternate kernel.
    pub fn alternate_kernel(&self) -> &'static str {
        self.alternate.name()
    }

    /// Heap memory held by the shadow buffers, in bytes.
    pub fn memory_bytes(&self) -> usize {
        use std::mem::size_of;
        self.shadow.cursors.capacity() * size_of::<f32>()
            + self.shadow.cubics.capacity() * size_of::<Cubic>()
            + self.shadow.values.capacity() * size_of::<f32>()
            + self.shadow.scratch.memory_bytes()
    }

    /// Run the bulk advance. Expired slots are left in `scratch.expired`.
    ///
    /// # Panics
    ///
    /// Under [`Strategy::Verify`], if the kernels disagree.
    pub fn advance(&mut self, delta: f32, columns: AdvanceColumns<'_>, scratch: &mut FrameScratch) {
        match self.strategy {
            Strategy::Reference => self.reference.advance(delta, columns, scratch),
            Strategy::Vectorized => self.alternate.advance(delta, columns, scratch),
            Strategy::Verify => {
                let AdvanceColumns { cursors, lengths } = columns;
                let shadow = &mut self.shadow;
                shadow.cursors.clear();
                shadow.cursors.extend_from_slice(cursors);

                self.reference.advance(
                    delta,
                    AdvanceColumns {
                        cursors: &mut *cursors,
                        lengths,
                    },
                    scratch,
                );
                self.alternate.advance(
                    delta,
                    AdvanceColumns {
                        cursors: &mut shadow.cursors,
                        lengths,
                    },
                    &mut shadow.scratch,
                );

                if let Err(mismatch) = compare_advance(
                    &scratch.expired,
                    &shadow.scratch.expired,
                    cursors,
                    &shadow.cursors,
                ) {
                    fail(self.alternate.name(), "advance", &mismatch);
                }
            }
        }
    }

    /// Run the bulk evaluation.
    ///
    /// # Panics
    ///
    /// Under [`Strategy::Verify`], if the kernels disagree.
    pub fn evaluate(&mut self, columns: EvaluateColumns<'_>) {
        match self.strategy {
            Strategy::Reference => self.reference.evaluate(columns),
            Strategy::Vectorized => self.alternate.evaluate(columns),
            Strategy::Verify => {
                let EvaluateColumns {
                    cubics,
                    cursors,
                    ranges,
                    values,
                } = columns;
                let shadow = &mut self.shadow;
                shadow.cubics.clear();
                shadow.cubics.extend_from_slice(cubics);
                shadow.values.clear();
                shadow.values.extend_from_slice(values);

                self.reference.evaluate(EvaluateColumns {
                    cubics: &mut *cubics,
                    cursors,
                    ranges,
                    values: &mut *values,
                });
                self.alternate.evaluate(EvaluateColumns {
                    cubics: &mut shadow.cubics,
                    cursors,
                    ranges,
                    values: &mut shadow.values,
                });

                if let Err(mismatch) =
                    compare_evaluate(values, &shadow.values, cubics, &shadow.cubics)
                {
                    fail(self.alternate.name(), "evaluate", &mismatch);
                }
            }
        }
    }
}

#[cold]
fn fail(kernel: &str, phase: &str, mismatch: &Mismatch) -> ! {
    error!("kernel '{kernel}' diverged from reference during {phase}: {mismatch}");
    panic!("verification mismatch in {phase} (kernel '{kernel}'): {mismatch}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::{Interval, OutputRange};

    /// Alternate that advances correctly but reports nothing expired.
    struct DropsExpired;

    impl BulkKernel for DropsExpired {
        fn name(&self) -> &'static str {
            "drops-expired"
        }

        fn advance(&self, delta: f32, columns: AdvanceColumns<'_>, scratch: &mut FrameScratch) {
            for x in columns.cursors.iter_mut() {
                *x += delta;
            }
            scratch.expired.clear();
        }

        fn evaluate(&self, columns: EvaluateColumns<'_>) {
            ReferenceKernel.evaluate(columns);
        }
    }

    /// Alternate that forgets to shift the modular constant.
    struct SkipsRenormalize;

    impl BulkKernel for SkipsRenormalize {
        fn name(&self) -> &'static str {
            "skips-renormalize"
        }

        fn advance(&self, delta: f32, columns: AdvanceColumns<'_>, scratch: &mut FrameScratch) {
            ReferenceKernel.advance(delta, columns, scratch);
        }

        fn evaluate(&self, columns: EvaluateColumns<'_>) {
            for (((cubic, &x), range), value) in columns
                .cubics
                .iter()
                .zip(columns.cursors)
                .zip(columns.ranges)
                .zip(columns.values.iter_mut())
            {
                *value = range.apply(cubic.evaluate(x)).0;
            }
        }
    }

    fn columns_fixture() -> (Vec<f32>, Vec<f32>, Vec<Cubic>, Vec<OutputRange>) {
        let cursors = vec![0.0, 4.0, 9.0];
        let lengths = vec![5.0, 5.0, 5.0];
        let cubics = vec![
            Cubic::constant(1.0),
            Cubic::constant(370.0),
            Cubic::new([0.0, 1.0, 0.0, 0.0]),
        ];
        let ranges = vec![
            OutputRange::IDENTITY,
            OutputRange::modular(Interval::new(0.0, 360.0)),
            OutputRange::clamped(Interval::new(0.0, 5.0)),
        ];
        (cursors, lengths, cubics, ranges)
    }

    fn run_frame(dispatcher: &mut Dispatcher) -> (Vec<f32>, Vec<f32>) {
        let (mut cursors, lengths, mut cubics, ranges) = columns_fixture();
        let mut values = vec![0.0; cursors.len()];
        let mut scratch = FrameScratch::new();
        dispatcher.advance(
            2.0,
            AdvanceColumns {
                cursors: &mut cursors,
                lengths: &lengths,
            },
            &mut scratch,
        );
        dispatcher.evaluate(EvaluateColumns {
            cubics: &mut cubics,
            cursors: &cursors,
            ranges: &ranges,
            values: &mut values,
        });
        (cursors, values)
    }

    #[test]
    fn all_strategies_agree_on_live_columns() {
        let results: Vec<_> = Strategy::ALL
            .into_iter()
            .map(|s| run_frame(&mut Dispatcher::new(s)))
            .collect();
        assert_eq!(results[0], results[1]);
        assert_eq!(results[0], results[2]);
        assert_eq!(results[0].1, vec![1.0, 10.0, 5.0]);
    }

    #[test]
    fn active_kernel_names() {
        assert_eq!(Dispatcher::new(Strategy::Reference).active_kernel(), "reference");
        assert_eq!(Dispatcher::new(Strategy::Vectorized).active_kernel(), "vectorized");
        assert_eq!(Dispatcher::new(Strategy::Verify).active_kernel(), "reference");
        assert_eq!(Dispatcher::new(Strategy::Verify).alternate_kernel(), "vectorized");
    }

    #[test]
    fn verify_grows_shadow_buffers() {
        let mut d = Dispatcher::new(Strategy::Verify);
        assert_eq!(d.memory_bytes(), 0);
        run_frame(&mut d);
        assert!(d.memory_bytes() > 0);
    }

    #[test]
    fn broken_kernel_is_harmless_outside_verify() {
        let mut d = Dispatcher::with_alternate(Strategy::Reference, Box::new(DropsExpired));
        run_frame(&mut d);
    }

    #[test]
    #[should_panic(expected = "verification mismatch in advance")]
    fn verify_catches_missing_expiry() {
        let mut d = Dispatcher::with_alternate(Strategy::Verify, Box::new(DropsExpired));
        run_frame(&mut d);
    }

    #[test]
    #[should_panic(expected = "verification mismatch in evaluate")]
    fn verify_catches_skipped_renormalization() {
        let mut d = Dispatcher::with_alternate(Strategy::Verify, Box::new(SkipsRenormalize));
        run_frame(&mut d);
    }
}
