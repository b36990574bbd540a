//! Output intervals and the range normalizer.
//!
//! Every slot carries an [`OutputRange`]: a bounded [`Interval`] and a
//! flag saying whether values outside it are clamped or wrapped. Wrapped
//! ("modular") ranges model cyclic quantities such as angles, where a
//! value one full turn past the end is the same value as the start.

use crate::error::RangeError;

/// A closed interval `[start, end]` on the real line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    start: f32,
    end: f32,
}

impl Interval {
    /// The whole real line. Clamping into it is the identity.
    pub const FULL: Interval = Interval {
        start: f32::NEG_INFINITY,
        end: f32::INFINITY,
    };

    /// Build `[start, end]`.
    ///
    /// Bounds must be ordered and not NaN. This is checked in debug
    /// builds only; use [`try_new`](Self::try_new) for untrusted input.
    pub fn new(start: f32, end: f32) -> Self {
        debug_assert!(
            start <= end,
            "invalid interval [{start}, {end}]: start must not exceed end"
        );
        Self { start, end }
    }

    /// Build `[start, end]`, rejecting NaN bounds and inverted intervals.
    pub fn try_new(start: f32, end: f32) -> Result<Self, RangeError> {
        if start.is_nan() || end.is_nan() {
            return Err(RangeError::NanBound);
        }
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build `[start, start + length]`.
    pub fn with_length(start: f32, length: f32) -> Self {
        Self::new(start, start + length)
    }

    /// Lower bound.
    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Upper bound.
    #[inline]
    pub fn end(&self) -> f32 {
        self.end
    }

    /// `end - start`.
    #[inline]
    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    /// Returns `true` if `start <= value <= end`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        self.start <= value && value <= self.end
    }

    /// Clamp `value` into the interval.
    ///
    /// Written as `max` then `min` so that the scalar and lane-wise
    /// evaluators share bit-identical results, and so that a NaN input
    /// collapses to a bound instead of propagating.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.start).min(self.end)
    }

    /// The amount to add to `value` to bring it back inside a modular
    /// interval.
    ///
    /// Assumes `value` lies at most one length outside the interval, which
    /// holds for a normalized polynomial constant drifting over one
    /// segment. Returns `+length` below the interval, `-length` above it,
    /// and `0.0` inside.
    ///
    /// Containment is closed at both ends: `end` itself is inside and is
    /// kept, so a modular `[0, 360]` range reports `360` rather than `0`.
    /// A half-open check would let `start - ε` wrap onto `end` in `f32`
    /// and still fail containment.
    #[inline]
    pub fn modular_adjustment(&self, value: f32) -> f32 {
        let length = self.length();
        if value < self.start {
            length
        } else if value > self.end {
            -length
        } else {
            0.0
        }
    }

    /// `value + modular_adjustment(value)`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        value + self.modular_adjustment(value)
    }

    /// Bring an arbitrary value into a modular interval, however many
    /// lengths away it is.
    ///
    /// Slower than [`normalize`](Self::normalize); used once per segment
    /// load rather than once per frame.
    pub fn normalize_initial(&self, value: f32) -> f32 {
        if self.contains(value) {
            return value;
        }
        let length = self.length();
        let turns = ((value - self.start) / length).floor();
        let wrapped = value - turns * length;
        // Rounding can land a hair outside; one cheap step fixes it.
        wrapped + self.modular_adjustment(wrapped)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::FULL
    }
}

/// Output bound of one slot: where its values must land and whether they
/// clamp or wrap to get there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputRange {
    /// The valid output interval.
    pub interval: Interval,
    /// `true` if values wrap around the interval instead of clamping.
    pub modular: bool,
}

impl OutputRange {
    /// Unbounded, non-modular. The default for freshly allocated slots.
    pub const IDENTITY: OutputRange = OutputRange {
        interval: Interval::FULL,
        modular: false,
    };

    /// A clamping range.
    pub fn clamped(interval: Interval) -> Self {
        Self {
            interval,
            modular: false,
        }
    }

    /// A wrapping range.
    ///
    /// The interval must have a finite, non-zero length (debug-checked).
    pub fn modular(interval: Interval) -> Self {
        debug_assert!(
            Self::modular_length_ok(interval.length()),
            "modular range needs a finite non-zero length, got {}",
            interval.length()
        );
        Self {
            interval,
            modular: true,
        }
    }

    /// A wrapping range, validated.
    pub fn try_modular(interval: Interval) -> Result<Self, RangeError> {
        let length = interval.length();
        if !Self::modular_length_ok(length) {
            return Err(RangeError::DegenerateModular { length });
        }
        Ok(Self {
            interval,
            modular: true,
        })
    }

    /// Bring a raw polynomial value into range.
    ///
    /// Returns `(value, adjustment)`. For a clamping range the adjustment
    /// is always `0.0`; for a modular range it is the amount that was
    /// added, which the caller also applies to the polynomial constant.
    #[inline]
    pub fn apply(&self, raw: f32) -> (f32, f32) {
        if self.modular {
            let adjustment = self.interval.modular_adjustment(raw);
            (raw + adjustment, adjustment)
        } else {
            (self.interval.clamp(raw), 0.0)
        }
    }

    fn modular_length_ok(length: f32) -> bool {
        length.is_finite() && length > 0.0
    }
}

impl Default for OutputRange {
    fn default() -> Self {
        Self::IDENTITY
    }
}
