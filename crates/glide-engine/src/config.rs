//! Evaluator configuration, validation, and error types.
//!
//! [`EvaluatorConfig`] is the builder-input for constructing a
//! [`BulkSplineEvaluator`](crate::BulkSplineEvaluator). The kernel
//! [`Strategy`] is fixed for the evaluator's lifetime.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::slots::SlotTable;

/// Environment variable read by [`EvaluatorConfig::from_env`].
pub const STRATEGY_ENV: &str = "GLIDE_BULK_STRATEGY";

// ── Strategy ───────────────────────────────────────────────────────

/// Which bulk kernel the dispatcher runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Portable scalar kernel only.
    Reference,
    /// The alternate (by default vectorized) kernel only.
    Vectorized,
    /// Run both kernels on independent copies of the state and panic on
    /// the first bit difference.
    Verify,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 3] = [Self::Reference, Self::Vectorized, Self::Verify];

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Vectorized => "vectorized",
            Self::Verify => "verify",
        }
    }
}

impl Default for Strategy {
    /// `Verify` when built with the `verify-kernels` feature, otherwise
    /// `Reference`.
    fn default() -> Self {
        if cfg!(feature = "verify-kernels") {
            Self::Verify
        } else {
            Self::Reference
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownStrategy {
                name: name.to_string(),
            })
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building an [`EvaluatorConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The strategy name is not one of `reference`, `vectorized`, `verify`.
    UnknownStrategy {
        /// The rejected name.
        name: String,
    },
    /// Slot count exceeds `u32::MAX`.
    SlotCountOverflow {
        /// The value that overflowed.
        value: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStrategy { name } => write!(
                f,
                "unknown bulk strategy '{name}' (expected reference, vectorized or verify)"
            ),
            Self::SlotCountOverflow { value } => {
                write!(f, "slot count {value} exceeds u32::MAX")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EvaluatorConfig ────────────────────────────────────────────────

/// Construction parameters for a bulk spline evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Kernel strategy. Default: [`Strategy::default()`].
    pub strategy: Strategy,
    /// Number of inert slots allocated up front. Default: 0.
    pub initial_slots: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            initial_slots: 0,
        }
    }
}

impl EvaluatorConfig {
    /// Default configuration with the strategy taken from
    /// `GLIDE_BULK_STRATEGY` when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = std::env::var_os(STRATEGY_ENV).map(|v| v.to_string_lossy().into_owned());
        Self::from_env_value(value.as_deref())
    }

    /// As [`from_env`](Self::from_env), with the variable's value passed in.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let strategy = match value {
            Some(v) if !v.trim().is_empty() => v.parse()?,
            _ => Strategy::default(),
        };
        Ok(Self {
            strategy,
            ..Self::default()
        })
    }

    /// Use `strategy`.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Allocate `slots` inert slots at construction.
    pub fn with_initial_slots(mut self, slots: usize) -> Self {
        self.initial_slots = slots;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_slots > SlotTable::MAX_SLOTS {
            return Err(ConfigError::SlotCountOverflow {
                value: self.initial_slots,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("reference".parse::<Strategy>(), Ok(Strategy::Reference));
        assert_eq!("Vectorized".parse::<Strategy>(), Ok(Strategy::Vectorized));
        assert_eq!(" VERIFY ".parse::<Strategy>(), Ok(Strategy::Verify));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "simd".parse::<Strategy>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownStrategy {
                name: "simd".into()
            }
        );
        assert!(err.to_string().contains("simd"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
    }

    #[test]
    fn env_value_unset_or_blank_is_default() {
        let cfg = EvaluatorConfig::from_env_value(None).unwrap();
        assert_eq!(cfg, EvaluatorConfig::default());
        let cfg = EvaluatorConfig::from_env_value(Some("  ")).unwrap();
        assert_eq!(cfg.strategy, Strategy::default());
    }

    #[test]
    fn env_value_selects_strategy() {
        let cfg = EvaluatorConfig::from_env_value(Some("verify")).unwrap();
        assert_eq!(cfg.strategy, Strategy::Verify);
        assert!(EvaluatorConfig::from_env_value(Some("fast")).is_err());
    }

    #[test]
    fn default_validates() {
        assert_eq!(EvaluatorConfig::default().validate(), Ok(()));
        let cfg = EvaluatorConfig::default().with_initial_slots(1024);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_slot_count_rejected() {
        let cfg = EvaluatorConfig::default().with_initial_slots(u32::MAX as usize + 1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SlotCountOverflow { .. })
        ));
    }

    #[cfg(not(feature = "verify-kernels"))]
    #[test]
    fn default_strategy_is_reference() {
        assert_eq!(Strategy::default(), Strategy::Reference);
    }
}
