//! Default scale sets.
//!
//! When no scale set is given, scales run linearly (floored) from
//! `s_min = max(20, N/100)` to `s_max = min(20·s_min, N/10)`.

use crate::config::{AsymmetryBase, DccaConfig, ProfileMode, ScaleRangeConfig};
use crate::errors::{validate_data_length, validate_equal_length, DccaError, DccaResult};
use crate::multifractal::dcca_with_config;
use crate::results::AsymmetricDccaAnalysis;

/// Generate `config.observations` scales for a series of length `n`.
///
/// The result is non-decreasing and may repeat scales when there are more
/// observations than integers in `[s_min, s_max]`.
///
/// # Errors
/// `InvalidParameter` for zero observations, `InsufficientData` when `n` is
/// too short for `s_max >= s_min`.
///
/// # Example
/// ```rust
/// use mf_adcca::{generate_scale_range, ScaleRangeConfig};
///
/// let scales = generate_scale_range(10_000, &ScaleRangeConfig::with_observations(5)).unwrap();
/// assert_eq!(scales, vec![100, 325, 550, 775, 1000]);
/// ```
pub fn generate_scale_range(n: usize, config: &ScaleRangeConfig) -> DccaResult<Vec<usize>> {
    if config.observations == 0 {
        return Err(DccaError::InvalidParameter {
            parameter: "observations".to_string(),
            value: 0.0,
            constraint: "at least 1".to_string(),
        });
    }
    if config.min_scale_divisor == 0 || config.max_scale_divisor == 0 {
        return Err(DccaError::Configuration {
            reason: "scale range divisors must be positive".to_string(),
        });
    }

    let s_min = config.min_scale_floor.max(n / config.min_scale_divisor);
    let s_max = (config.max_scale_multiplier * s_min).min(n / config.max_scale_divisor);

    if s_max < s_min {
        return Err(DccaError::InsufficientData {
            required: s_min * config.max_scale_divisor,
            actual: n,
        });
    }

    if config.observations == 1 {
        return Ok(vec![s_min]);
    }

    let increment = (s_max - s_min) as f64 / (config.observations - 1) as f64;
    Ok((0..config.observations)
        .map(|i| s_min + (i as f64 * increment).floor() as usize)
        .collect())
}

/// Run MF-A-DCCA over the default scale set, with the classic argument list.
///
/// Same arguments as [`dcca`](crate::multifractal::dcca) except that the scale
/// set is derived from the series length with `observations` scales.
#[allow(clippy::too_many_arguments)]
pub fn basic_dcca(
    x: &[f64],
    y: &[f64],
    q_values: &[f64],
    polynomial_order: usize,
    trend_base: Option<&[f64]>,
    skip_agg: bool,
    observations: usize,
    asymmetry_base: &str,
) -> DccaResult<AsymmetricDccaAnalysis> {
    let base = match asymmetry_base.parse::<AsymmetryBase>()? {
        AsymmetryBase::Optional(_) => AsymmetryBase::optional(trend_base),
        other => other,
    };

    let config = DccaConfig::new(q_values)
        .with_polynomial_order(polynomial_order)
        .with_asymmetry_base(base)
        .with_profile_mode(ProfileMode::from_skip_agg(skip_agg));

    basic_dcca_with_config(x, y, &config, &ScaleRangeConfig::with_observations(observations))
}

/// Run MF-A-DCCA over a scale set generated by [`generate_scale_range`].
pub fn basic_dcca_with_config(
    x: &[f64],
    y: &[f64],
    config: &DccaConfig,
    range: &ScaleRangeConfig,
) -> DccaResult<AsymmetricDccaAnalysis> {
    validate_data_length(x, 1)?;
    validate_equal_length(y, x.len(), "y")?;
    let scales = generate_scale_range(x.len(), range)?;
    dcca_with_config(x, y, &scales, config)
}
