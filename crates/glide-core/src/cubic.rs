//! The cubic segment polynomial.
//!
//! One [`Cubic`] approximates one curve segment over a local offset
//! `x ∈ [0, width]`. Slots own their cubic by value; the constant term is
//! deliberately mutable so that modular ranges can be renormalized in
//! place without refitting the segment.

/// `c0 + c1·x + c2·x² + c3·x³`, evaluated at a segment-local offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cubic {
    coeffs: [f32; 4],
}

impl Cubic {
    /// Number of coefficients.
    pub const COEFF_COUNT: usize = 4;

    /// Build from coefficients in increasing degree: `[c0, c1, c2, c3]`.
    pub const fn new(coeffs: [f32; 4]) -> Self {
        Self { coeffs }
    }

    /// The constant polynomial `y`.
    pub const fn constant(y: f32) -> Self {
        Self {
            coeffs: [y, 0.0, 0.0, 0.0],
        }
    }

    /// Fit the Hermite cubic described by `init`.
    ///
    /// The result starts at `init.start_y` with slope `init.start_derivative`
    /// at `x = 0`, and ends at `init.end_y` with slope
    /// `init.end_derivative` at `x = init.width_x`. A segment without
    /// positive width degenerates to the constant `start_y`.
    pub fn from_init(init: &CubicInit) -> Self {
        let w = init.width_x;
        if !(w > 0.0) {
            return Self::constant(init.start_y);
        }
        let rise = (init.end_y - init.start_y) / w;
        let s0 = init.start_derivative;
        let s1 = init.end_derivative;
        Self {
            coeffs: [
                init.start_y,
                s0,
                (3.0 * rise - 2.0 * s0 - s1) / w,
                (s0 + s1 - 2.0 * rise) / (w * w),
            ],
        }
    }

    /// Value at `x` (Horner form).
    ///
    /// Every evaluator path uses this exact operation order, so lane-wise
    /// and scalar evaluation agree bit for bit.
    #[inline]
    pub fn evaluate(&self, x: f32) -> f32 {
        let [c0, c1, c2, c3] = self.coeffs;
        ((c3 * x + c2) * x + c1) * x + c0
    }

    /// First derivative at `x`.
    #[inline]
    pub fn derivative(&self, x: f32) -> f32 {
        let [_, c1, c2, c3] = self.coeffs;
        (3.0 * c3 * x + 2.0 * c2) * x + c1
    }

    /// Second derivative at `x`.
    #[inline]
    pub fn second_derivative(&self, x: f32) -> f32 {
        let [_, _, c2, c3] = self.coeffs;
        6.0 * c3 * x + 2.0 * c2
    }

    /// Coefficient of `x^degree`.
    #[inline]
    pub fn coeff(&self, degree: usize) -> f32 {
        self.coeffs[degree]
    }

    /// Overwrite the coefficient of `x^degree`.
    #[inline]
    pub fn set_coeff(&mut self, degree: usize, value: f32) {
        self.coeffs[degree] = value;
    }

    /// Shift the whole polynomial vertically by `offset`.
    #[inline]
    pub fn shift(&mut self, offset: f32) {
        self.coeffs[0] += offset;
    }

    /// All coefficients, `[c0, c1, c2, c3]`.
    #[inline]
    pub fn coeffs(&self) -> [f32; 4] {
        self.coeffs
    }

    /// Bitwise equality, distinguishing `-0.0` from `0.0` and comparing
    /// NaN payloads. `PartialEq` is float equality.
    pub fn bits_eq(&self, other: &Cubic) -> bool {
        self.coeffs
            .iter()
            .zip(other.coeffs.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// Endpoint description of one curve segment.
///
/// Curves describe segments this way and the engine fits a [`Cubic`] from
/// it whenever a slot moves onto a new segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicInit {
    /// Value at the start of the segment.
    pub start_y: f32,
    /// Slope at the start of the segment.
    pub start_derivative: f32,
    /// Value at the end of the segment.
    pub end_y: f32,
    /// Slope at the end of the segment.
    pub end_derivative: f32,
    /// Width of the segment along the playback axis.
    pub width_x: f32,
}

impl CubicInit {
    /// A flat segment holding `y` for `width_x`.
    pub fn flat(y: f32, width_x: f32) -> Self {
        Self {
            start_y: y,
            start_derivative: 0.0,
            end_y: y,
            end_derivative: 0.0,
            width_x,
        }
    }

    /// A straight line from `start_y` to `end_y` over `width_x`.
    pub fn linear(start_y: f32, end_y: f32, width_x: f32) -> Self {
        let slope = if width_x > 0.0 {
            (end_y - start_y) / width_x
        } else {
            0.0
        };
        Self {
            start_y,
            start_derivative: slope,
            end_y,
            end_derivative: slope,
            width_x,
        }
    }
}
