//! # Analysis Configuration
//!
//! Configuration for asymmetric DCCA: how profiles are built, which series
//! decides the trend direction of a segment, which segment statistic is
//! measured, and how default scale ranges are derived.

use crate::errors::DccaError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default fluctuation orders.
pub const DEFAULT_Q_VALUES: [f64; 9] = [-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0];

/// Series used to decide whether a segment is in a positive or negative trend.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AsymmetryBase {
    /// `exp` of the raw cumulative sum of `x` (x treated as log-returns of an index).
    #[default]
    Index,
    /// The raw `x` series.
    Return,
    /// A caller-supplied series of the same length as `x`.
    ///
    /// Parsing `"optional"` from a string yields `Optional(None)`, which is
    /// rejected when the analysis runs.
    Optional(Option<Vec<f64>>),
}

impl AsymmetryBase {
    /// Name used by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            AsymmetryBase::Index => "index",
            AsymmetryBase::Return => "return",
            AsymmetryBase::Optional(_) => "optional",
        }
    }

    /// Builds the variant that carries a caller-supplied reference series.
    ///
    /// `None` gives an `Optional` without data, matching a call that selected
    /// "optional" but forgot the series.
    pub fn optional(trend_base: Option<&[f64]>) -> Self {
        AsymmetryBase::Optional(trend_base.map(<[f64]>::to_vec))
    }
}

impl FromStr for AsymmetryBase {
    type Err = DccaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" => Ok(AsymmetryBase::Index),
            "return" => Ok(AsymmetryBase::Return),
            "optional" => Ok(AsymmetryBase::Optional(None)),
            other => Err(DccaError::Configuration {
                reason: format!(
                    "unknown asymmetry base '{}': expected index, return or optional",
                    other
                ),
            }),
        }
    }
}

/// How a raw series is turned into the profile that gets segmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProfileMode {
    /// Zero-mean cumulative sum. Use for stationary input such as log-returns.
    #[default]
    Integrated,
    /// The series as given. Use for input that is already non-stationary.
    Raw,
}

impl ProfileMode {
    /// Maps the classic `skip_agg` flag onto a profile mode.
    pub fn from_skip_agg(skip_agg: bool) -> Self {
        if skip_agg {
            ProfileMode::Raw
        } else {
            ProfileMode::Integrated
        }
    }
}

/// Segment statistic measured after detrending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FluctuationKind {
    /// Mean of |ΔX|·|ΔY| (DCCA).
    #[default]
    CrossCorrelation,
    /// Mean of ΔX² (DFA of `x`).
    AutoX,
    /// Mean of ΔY² (DFA of `y`).
    AutoY,
}

/// Configuration for an asymmetric DCCA run over an explicit scale set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DccaConfig {
    /// Degree of the local polynomial trend removed from each segment
    pub polynomial_order: usize,
    /// Fluctuation orders q
    pub q_values: Vec<f64>,
    /// Trend reference policy
    pub asymmetry_base: AsymmetryBase,
    /// Profile construction
    pub profile_mode: ProfileMode,
    /// Segment statistic
    pub fluctuation_kind: FluctuationKind,
}

impl Default for DccaConfig {
    fn default() -> Self {
        Self {
            polynomial_order: 2,
            q_values: DEFAULT_Q_VALUES.to_vec(),
            asymmetry_base: AsymmetryBase::default(),
            profile_mode: ProfileMode::default(),
            fluctuation_kind: FluctuationKind::default(),
        }
    }
}

impl DccaConfig {
    /// Configuration with the given q values and defaults elsewhere.
    pub fn new(q_values: &[f64]) -> Self {
        Self {
            q_values: q_values.to_vec(),
            ..Self::default()
        }
    }

    /// Set the detrending polynomial order.
    pub fn with_polynomial_order(mut self, order: usize) -> Self {
        self.polynomial_order = order;
        self
    }

    /// Set the trend reference policy.
    pub fn with_asymmetry_base(mut self, base: AsymmetryBase) -> Self {
        self.asymmetry_base = base;
        self
    }

    /// Set the profile construction mode.
    pub fn with_profile_mode(mut self, mode: ProfileMode) -> Self {
        self.profile_mode = mode;
        self
    }

    /// Set the segment statistic.
    pub fn with_fluctuation_kind(mut self, kind: FluctuationKind) -> Self {
        self.fluctuation_kind = kind;
        self
    }
}

/// Constants used to derive a default scale set from the series length.
///
/// `s_min = max(min_scale_floor, N / min_scale_divisor)`,
/// `s_max = min(max_scale_multiplier * s_min, N / max_scale_divisor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleRangeConfig {
    /// Number of scales generated
    pub observations: usize,
    /// Lower bound for the smallest scale
    pub min_scale_floor: usize,
    /// Smallest scale as a fraction of N
    pub min_scale_divisor: usize,
    /// Largest scale as a multiple of the smallest
    pub max_scale_multiplier: usize,
    /// Largest scale as a fraction of N
    pub max_scale_divisor: usize,
}

impl Default for ScaleRangeConfig {
    fn default() -> Self {
        Self {
            observations: 100,
            min_scale_floor: 20,
            min_scale_divisor: 100,
            max_scale_multiplier: 20,
            max_scale_divisor: 10,
        }
    }
}

impl ScaleRangeConfig {
    /// Default range constants with a custom number of scales.
    pub fn with_observations(observations: usize) -> Self {
        Self {
            observations,
            ..Self::default()
        }
    }
}
