//! Error types and input validation for asymmetric DCCA.
//!
//! Malformed inputs are rejected up front with a [`DccaError`]. Numeric
//! degeneracy inside the estimator (empty trend classes, zero fluctuations) is
//! not an error: it surfaces as NaN cells together with a
//! [`DegeneracyWarning`](crate::results::DegeneracyWarning).

use thiserror::Error;

/// Error types for asymmetric detrended cross-correlation analysis.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DccaError {
    /// A series does not have the same length as the primary series `x`.
    #[error("Length mismatch: {series} has {actual} points, expected {expected}")]
    LengthMismatch {
        /// Name of the offending series
        series: String,
        /// Length of `x`
        expected: usize,
        /// Length actually provided
        actual: usize,
    },

    /// The analysis was configured with an unusable option.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// What is wrong with the configuration
        reason: String,
    },

    /// Invalid parameter value.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Not enough data for the requested analysis.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual number of data points provided
        actual: usize,
    },

    /// Input contains values the estimator cannot work with.
    #[error("Numerical error: {reason}")]
    NumericalError {
        /// Detailed reason
        reason: String,
    },
}

/// Result type for asymmetric DCCA operations.
pub type DccaResult<T> = Result<T, DccaError>;

/// Validates that data is non-empty and has at least `min_required` points.
///
/// # Example
/// ```rust
/// use mf_adcca::errors::validate_data_length;
///
/// let data = vec![1.0, 2.0, 3.0];
/// assert!(validate_data_length(&data, 2).is_ok());
/// assert!(validate_data_length(&data, 5).is_err());
/// ```
pub fn validate_data_length(data: &[f64], min_required: usize) -> DccaResult<()> {
    let required = min_required.max(1);
    if data.len() < required {
        return Err(DccaError::InsufficientData {
            required,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Validates that `series` has exactly `expected` points.
///
/// # Example
/// ```rust
/// use mf_adcca::errors::{validate_equal_length, DccaError};
///
/// assert!(validate_equal_length(&[1.0, 2.0], 2, "y").is_ok());
/// assert!(matches!(
///     validate_equal_length(&[1.0], 2, "y"),
///     Err(DccaError::LengthMismatch { .. })
/// ));
/// ```
pub fn validate_equal_length(series: &[f64], expected: usize, name: &str) -> DccaResult<()> {
    if series.len() != expected {
        return Err(DccaError::LengthMismatch {
            series: name.to_string(),
            expected,
            actual: series.len(),
        });
    }
    Ok(())
}

/// Validates that all values in a slice are finite.
///
/// Returns on the first non-finite value.
pub fn validate_all_finite(data: &[f64], name: &str) -> DccaResult<()> {
    if let Some((i, value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(DccaError::NumericalError {
            reason: format!("{} contains non-finite value at index {}: {}", name, i, value),
        });
    }
    Ok(())
}

/// Validates a scale set against a series of length `n`.
///
/// Every scale must satisfy `1 <= s <= n` and the set must be non-empty.
/// Scales below `polynomial_order + 1` are accepted; the fit is then
/// under-determined and reported as a degeneracy, not an error.
pub fn validate_scales(scales: &[usize], n: usize) -> DccaResult<()> {
    if scales.is_empty() {
        return Err(DccaError::InvalidParameter {
            parameter: "scales".to_string(),
            value: 0.0,
            constraint: "at least one scale".to_string(),
        });
    }

    if let Some(&bad) = scales.iter().find(|&&s| s == 0 || s > n) {
        return Err(DccaError::InvalidParameter {
            parameter: "scale".to_string(),
            value: bad as f64,
            constraint: format!("[1, {}]", n),
        });
    }

    Ok(())
}
