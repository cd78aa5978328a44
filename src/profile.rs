//! Profile and trend-reference construction.

use crate::config::{AsymmetryBase, ProfileMode};
use crate::errors::{validate_all_finite, validate_equal_length, DccaError, DccaResult};
use crate::math_utils::{cumulative_sum, integrate_series};

/// Build the profile of one series.
pub fn build_profile(series: &[f64], mode: ProfileMode) -> Vec<f64> {
    match mode {
        ProfileMode::Integrated => integrate_series(series),
        ProfileMode::Raw => series.to_vec(),
    }
}

/// Build the profiles of `x` and `y` with the same transform.
///
/// Lengths are checked by the caller.
pub fn build_profiles(x: &[f64], y: &[f64], mode: ProfileMode) -> (Vec<f64>, Vec<f64>) {
    (build_profile(x, mode), build_profile(y, mode))
}

/// Build the series whose local slope classifies each segment.
///
/// * `Index` - `exp` of the raw cumulative sum of `x`
/// * `Return` - `x` itself
/// * `Optional` - the supplied series, which must match the length of `x`
///
/// # Errors
/// `Configuration` if `Optional` carries no series, `LengthMismatch` if its
/// length differs from `x`, `NumericalError` if it holds non-finite values.
pub fn build_trend_reference(x: &[f64], base: &AsymmetryBase) -> DccaResult<Vec<f64>> {
    match base {
        AsymmetryBase::Index => Ok(cumulative_sum(x).into_iter().map(f64::exp).collect()),
        AsymmetryBase::Return => Ok(x.to_vec()),
        AsymmetryBase::Optional(None) => Err(DccaError::Configuration {
            reason: "asymmetry base 'optional' requires a trend_base series".to_string(),
        }),
        AsymmetryBase::Optional(Some(reference)) => {
            validate_equal_length(reference, x.len(), "trend_base")?;
            validate_all_finite(reference, "trend_base")?;
            Ok(reference.clone())
        }
    }
}
