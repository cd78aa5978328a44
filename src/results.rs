//! # Analysis Results Structures
//!
//! Output of an asymmetric DCCA run: per trend class, the fluctuation
//! functions for every `(q, s)` pair and the generalized Hurst exponents, plus
//! the soft segment counts and any numeric degeneracy encountered.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Segments a fluctuation function is aggregated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrendClass {
    /// All segments
    Overall,
    /// Segments whose reference series trends upwards
    Positive,
    /// Segments whose reference series trends downwards
    Negative,
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendClass::Overall => write!(f, "overall"),
            TrendClass::Positive => write!(f, "positive"),
            TrendClass::Negative => write!(f, "negative"),
        }
    }
}

/// Fluctuation functions and generalized Hurst exponents of one trend class.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrendClassResult {
    /// Trend class
    pub class: TrendClass,
    /// Scale set, in caller order
    pub scales: Vec<usize>,
    /// Fluctuation orders, in caller order
    pub q_values: Vec<f64>,
    /// `F_q(s)`, indexed `[q][s]`
    pub fluctuations: Vec<Vec<f64>>,
    /// `H(q)`, one per q
    pub hurst_exponents: Vec<f64>,
}

impl TrendClassResult {
    /// `F_q(s)` over the scale set for the q at `q_index`.
    pub fn fluctuations_for_q(&self, q_index: usize) -> Option<&[f64]> {
        self.fluctuations.get(q_index).map(Vec::as_slice)
    }

    /// `H(q)` for an exact q value.
    pub fn hurst_for(&self, q: f64) -> Option<f64> {
        self.q_values
            .iter()
            .position(|&candidate| candidate == q)
            .map(|i| self.hurst_exponents[i])
    }

    /// `(q, H(q))` pairs.
    pub fn generalized_hurst_exponents(&self) -> Vec<(f64, f64)> {
        self.q_values
            .iter()
            .copied()
            .zip(self.hurst_exponents.iter().copied())
            .collect()
    }

    /// Mass exponents `τ(q) = q·H(q) - 1`.
    pub fn mass_exponents(&self) -> Vec<(f64, f64)> {
        self.generalized_hurst_exponents()
            .into_iter()
            .map(|(q, h)| (q, q * h - 1.0))
            .collect()
    }

    /// Spread `max H(q) - min H(q)` over the finite exponents.
    ///
    /// NaN when no exponent is finite.
    pub fn multifractality_degree(&self) -> f64 {
        let finite: Vec<f64> = self
            .hurst_exponents
            .iter()
            .copied()
            .filter(|h| h.is_finite())
            .collect();
        if finite.is_empty() {
            return f64::NAN;
        }

        let h_min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let h_max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        h_max - h_min
    }
}

/// Soft segment counts of one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentCounts {
    /// Scale
    pub scale: usize,
    /// Number of segments, `2·Ns`
    pub segments: usize,
    /// Σ (1 + sign(slope)) / 2
    pub m_plus: f64,
    /// Σ (1 - sign(slope)) / 2
    pub m_minus: f64,
}

/// Numeric degeneracy that produced non-finite output without aborting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegeneracyWarning {
    /// No segment at this scale belongs to the trend class; its `F_q(s)` is NaN.
    EmptyTrendClass {
        /// Scale
        scale: usize,
        /// Trend class without segments
        class: TrendClass,
    },
    /// Segment fluctuations are zero, negative or NaN; logarithms of them are undefined.
    NonPositiveFluctuation {
        /// Scale
        scale: usize,
        /// Number of affected segments
        segments: usize,
    },
    /// Trend slopes are NaN (non-finite reference values); both class weights are NaN.
    UndefinedTrend {
        /// Scale
        scale: usize,
        /// Number of segments with an undefined slope
        segments: usize,
    },
    /// The scale has fewer points than polynomial coefficients.
    UnderdeterminedFit {
        /// Scale
        scale: usize,
        /// Polynomial order
        polynomial_order: usize,
    },
    /// The scale set has fewer than two distinct scales; `H(q)` is NaN.
    InsufficientScales {
        /// Number of distinct scales
        distinct: usize,
    },
}

impl fmt::Display for DegeneracyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegeneracyWarning::EmptyTrendClass { scale, class } => {
                write!(f, "no {} trend segments at scale {}", class, scale)
            }
            DegeneracyWarning::NonPositiveFluctuation { scale, segments } => write!(
                f,
                "{} segment(s) at scale {} have a non-positive fluctuation",
                segments, scale
            ),
            DegeneracyWarning::UndefinedTrend { scale, segments } => write!(
                f,
                "{} segment(s) at scale {} have an undefined trend slope",
                segments, scale
            ),
            DegeneracyWarning::UnderdeterminedFit {
                scale,
                polynomial_order,
            } => write!(
                f,
                "scale {} is too short for a degree {} polynomial fit",
                scale, polynomial_order
            ),
            DegeneracyWarning::InsufficientScales { distinct } => write!(
                f,
                "{} distinct scale(s), at least 2 needed for a scaling fit",
                distinct
            ),
        }
    }
}

/// The classic nine-value return shape:
/// `(S, F, H, S, F⁺, H⁺, S, F⁻, H⁻)` with each `F` indexed `[q][s]`.
pub type DccaTuple = (
    Vec<usize>,
    Vec<Vec<f64>>,
    Vec<f64>,
    Vec<usize>,
    Vec<Vec<f64>>,
    Vec<f64>,
    Vec<usize>,
    Vec<Vec<f64>>,
    Vec<f64>,
);

/// Results of multifractal asymmetric detrended cross-correlation analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AsymmetricDccaAnalysis {
    /// Fluctuation orders
    pub q_values: Vec<f64>,
    /// All segments
    pub overall: TrendClassResult,
    /// Positive-trend segments
    pub positive: TrendClassResult,
    /// Negative-trend segments
    pub negative: TrendClassResult,
    /// Soft segment counts per scale
    pub segment_counts: Vec<SegmentCounts>,
    /// Degeneracy encountered while computing
    pub warnings: Vec<DegeneracyWarning>,
}

impl AsymmetricDccaAnalysis {
    /// Results for one trend class.
    pub fn class(&self, class: TrendClass) -> &TrendClassResult {
        match class {
            TrendClass::Overall => &self.overall,
            TrendClass::Positive => &self.positive,
            TrendClass::Negative => &self.negative,
        }
    }

    /// Scale set used by the analysis.
    pub fn scales(&self) -> &[usize] {
        &self.overall.scales
    }

    /// Asymmetry degree `ΔH(q) = H⁺(q) - H⁻(q)` for every q.
    pub fn asymmetry_degree(&self) -> Vec<f64> {
        self.positive
            .hurst_exponents
            .iter()
            .zip(&self.negative.hurst_exponents)
            .map(|(plus, minus)| plus - minus)
            .collect()
    }

    /// Mean of `ΔH(q)` over the q set. NaN if any `ΔH(q)` is NaN.
    pub fn mean_asymmetry_degree(&self) -> f64 {
        let degrees = self.asymmetry_degree();
        degrees.iter().sum::<f64>() / degrees.len() as f64
    }

    /// Whether any degeneracy was recorded.
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert into the nine-value shape.
    pub fn into_tuple(self) -> DccaTuple {
        (
            self.overall.scales,
            self.overall.fluctuations,
            self.overall.hurst_exponents,
            self.positive.scales,
            self.positive.fluctuations,
            self.positive.hurst_exponents,
            self.negative.scales,
            self.negative.fluctuations,
            self.negative.hurst_exponents,
        )
    }
}
