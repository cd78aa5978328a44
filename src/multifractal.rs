//! Multifractal asymmetric detrended cross-correlation analysis (MF-A-DCCA).
//!
//! For every scale the profiles are cut into `2·Ns` segments, each segment is
//! detrended and measured, and its trend direction is read off a reference
//! series. For every fluctuation order q the segment fluctuations are combined
//! into `F_q(s)`, once over all segments and once per trend direction, and the
//! generalized Hurst exponent `H(q)` is the slope of `ln F_q(s)` against
//! `ln s`.
//!
//! Segment statistics do not depend on q, so they are computed once per scale
//! and shared by all q values.

use crate::config::{AsymmetryBase, DccaConfig, FluctuationKind, ProfileMode};
use crate::errors::{
    validate_all_finite, validate_data_length, validate_equal_length, validate_scales,
    DccaResult,
};
use crate::linear_algebra::PolynomialDetrender;
use crate::math_utils::{distinct_count, log_log_slope};
use crate::profile::{build_profiles, build_trend_reference};
use crate::results::{
    AsymmetricDccaAnalysis, DegeneracyWarning, SegmentCounts, TrendClass, TrendClassResult,
};
use crate::segments::{ScaleSegments, TrendSign};
use log::{debug, warn};

/// Run MF-A-DCCA with the classic argument list.
///
/// * `x`, `y` - series of equal length N
/// * `scales` - segment lengths, each in `1..=N`; should be at least `m + 1`
/// * `polynomial_order` - detrending degree `m`
/// * `q_values` - fluctuation orders
/// * `trend_base` - reference series, used when `asymmetry_base` is `"optional"`
/// * `skip_agg` - use the raw series as profiles instead of integrating them
/// * `asymmetry_base` - `"index"`, `"return"` or `"optional"`
///
/// # Errors
/// `LengthMismatch` if `y` or `trend_base` differ in length from `x`,
/// `Configuration` for an unknown `asymmetry_base` or `"optional"` without a
/// `trend_base`, `InvalidParameter` for out-of-range scales.
#[allow(clippy::too_many_arguments)]
pub fn dcca(
    x: &[f64],
    y: &[f64],
    scales: &[usize],
    polynomial_order: usize,
    q_values: &[f64],
    trend_base: Option<&[f64]>,
    skip_agg: bool,
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

    dcca_with_config(x, y, scales, &config)
}

/// Run MF-A-DCCA over an explicit scale set.
pub fn dcca_with_config(
    x: &[f64],
    y: &[f64],
    scales: &[usize],
    config: &DccaConfig,
) -> DccaResult<AsymmetricDccaAnalysis> {
    let n = x.len();
    validate_data_length(x, 1)?;
    validate_equal_length(y, n, "y")?;
    validate_all_finite(x, "x")?;
    validate_all_finite(y, "y")?;
    validate_scales(scales, n)?;
    let reference = build_trend_reference(x, &config.asymmetry_base)?;

    debug!(
        "MF-A-DCCA: n={}, scales={}, q_values={}, order={}, asymmetry_base={}, kind={:?}",
        n,
        scales.len(),
        config.q_values.len(),
        config.polynomial_order,
        config.asymmetry_base.name(),
        config.fluctuation_kind
    );

    let (x_profile, y_profile) = build_profiles(x, y, config.profile_mode);

    let per_scale = compute_scale_segments(
        scales,
        &x_profile,
        &y_profile,
        &reference,
        config.polynomial_order,
        config.fluctuation_kind,
    )?;

    let mut warnings = Vec::new();
    for (segments, detrender_underdetermined) in &per_scale {
        if *detrender_underdetermined {
            warn!(
                "scale {} is shorter than {} points needed for a degree {} fit",
                segments.scale,
                config.polynomial_order + 1,
                config.polynomial_order
            );
            warnings.push(DegeneracyWarning::UnderdeterminedFit {
                scale: segments.scale,
                polynomial_order: config.polynomial_order,
            });
        }
        collect_segment_warnings(segments, &mut warnings);
    }

    let distinct = distinct_count(scales);
    if distinct < 2 {
        warn!("{} distinct scale(s): generalized Hurst exponents are undefined", distinct);
        warnings.push(DegeneracyWarning::InsufficientScales { distinct });
    }

    let weights: Vec<ClassWeights> = per_scale
        .iter()
        .map(|(segments, _)| ClassWeights::from_segments(segments))
        .collect();

    let rows = compute_q_rows(&config.q_values, &per_scale, &weights);

    let segment_counts = per_scale
        .iter()
        .map(|(segments, _)| SegmentCounts {
            scale: segments.scale,
            segments: segments.segment_count(),
            m_plus: segments.m_plus,
            m_minus: segments.m_minus,
        })
        .collect();

    Ok(AsymmetricDccaAnalysis {
        q_values: config.q_values.clone(),
        overall: class_result(TrendClass::Overall, scales, &config.q_values, &rows),
        positive: class_result(TrendClass::Positive, scales, &config.q_values, &rows),
        negative: class_result(TrendClass::Negative, scales, &config.q_values, &rows),
        segment_counts,
        warnings,
    })
}

/// Asymmetric MF-DFA of a single series.
///
/// Equivalent to [`dcca_with_config`] with `y = x` and the squared-residual
/// segment statistic.
pub fn mfdfa_with_config(
    x: &[f64],
    scales: &[usize],
    config: &DccaConfig,
) -> DccaResult<AsymmetricDccaAnalysis> {
    let config = config
        .clone()
        .with_fluctuation_kind(FluctuationKind::AutoX);
    dcca_with_config(x, x, scales, &config)
}

/// qth-order fluctuation function over weighted segments.
///
/// `q == 0` uses the logarithmic average
/// `exp(Σ w·ln f / Σ w / 2)`; any other q uses `(Σ w·f^(q/2) / Σ w)^(1/q)`.
/// Segment fluctuations are squared quantities, hence the halved exponents.
/// An empty class (`Σ w == 0`) or a non-positive fluctuation gives NaN or an
/// infinite value rather than an error.
pub fn qth_order_fluctuation(fluctuations: &[f64], weights: &[f64], q: f64) -> f64 {
    debug_assert_eq!(fluctuations.len(), weights.len());
    let total: f64 = weights.iter().sum();

    if q == 0.0 {
        let log_sum: f64 = fluctuations
            .iter()
            .zip(weights)
            .map(|(f, w)| w * f.ln())
            .sum();
        (log_sum / total / 2.0).exp()
    } else {
        let moment_sum: f64 = fluctuations
            .iter()
            .zip(weights)
            .map(|(f, w)| w * f.powf(q / 2.0))
            .sum();
        (moment_sum / total).powf(1.0 / q)
    }
}

/// Segment weights of one scale for each trend class.
struct ClassWeights {
    overall: Vec<f64>,
    positive: Vec<f64>,
    negative: Vec<f64>,
}

impl ClassWeights {
    fn from_segments(segments: &ScaleSegments) -> Self {
        Self {
            overall: vec![1.0; segments.segment_count()],
            positive: segments.signs.iter().map(|s| s.positive_weight()).collect(),
            negative: segments.signs.iter().map(|s| s.negative_weight()).collect(),
        }
    }

    fn get(&self, class: TrendClass) -> &[f64] {
        match class {
            TrendClass::Overall => &self.overall,
            TrendClass::Positive => &self.positive,
            TrendClass::Negative => &self.negative,
        }
    }
}

/// `F_q(s)` over the scale set for one q, per trend class.
struct QRow {
    overall: Vec<f64>,
    positive: Vec<f64>,
    negative: Vec<f64>,
}

impl QRow {
    fn get(&self, class: TrendClass) -> &[f64] {
        match class {
            TrendClass::Overall => &self.overall,
            TrendClass::Positive => &self.positive,
            TrendClass::Negative => &self.negative,
        }
    }
}

type ScaleWork = (ScaleSegments, bool);

/// Segment statistics for every scale, with a flag for under-determined fits.
fn compute_scale_segments(
    scales: &[usize],
    x_profile: &[f64],
    y_profile: &[f64],
    reference: &[f64],
    polynomial_order: usize,
    kind: FluctuationKind,
) -> DccaResult<Vec<ScaleWork>> {
    let compute_one = |&scale: &usize| -> DccaResult<ScaleWork> {
        let detrender = PolynomialDetrender::new(scale, polynomial_order)?;
        let segments =
            ScaleSegments::compute(scale, x_profile, y_profile, reference, &detrender, kind);
        Ok((segments, detrender.is_underdetermined()))
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        scales.par_iter().map(compute_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        scales.iter().map(compute_one).collect()
    }
}

/// Fluctuation functions for every q, in q order.
fn compute_q_rows(
    q_values: &[f64],
    per_scale: &[ScaleWork],
    weights: &[ClassWeights],
) -> Vec<QRow> {
    let compute_one = |&q: &f64| -> QRow {
        let row = |class: TrendClass| -> Vec<f64> {
            per_scale
                .iter()
                .zip(weights)
                .map(|((segments, _), w)| {
                    qth_order_fluctuation(&segments.fluctuations, w.get(class), q)
                })
                .collect()
        };
        QRow {
            overall: row(TrendClass::Overall),
            positive: row(TrendClass::Positive),
            negative: row(TrendClass::Negative),
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        q_values.par_iter().map(compute_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        q_values.iter().map(compute_one).collect()
    }
}

fn class_result(
    class: TrendClass,
    scales: &[usize],
    q_values: &[f64],
    rows: &[QRow],
) -> TrendClassResult {
    let fluctuations: Vec<Vec<f64>> = rows.iter().map(|row| row.get(class).to_vec()).collect();
    let hurst_exponents = fluctuations
        .iter()
        .map(|f_q| log_log_slope(scales, f_q))
        .collect();

    TrendClassResult {
        class,
        scales: scales.to_vec(),
        q_values: q_values.to_vec(),
        fluctuations,
        hurst_exponents,
    }
}

fn collect_segment_warnings(segments: &ScaleSegments, warnings: &mut Vec<DegeneracyWarning>) {
    let scale = segments.scale;

    let non_positive = segments
        .fluctuations
        .iter()
        .filter(|&&f| f.is_nan() || f <= 0.0)
        .count();
    if non_positive > 0 {
        warn!("scale {}: {} segment(s) with non-positive fluctuation", scale, non_positive);
        warnings.push(DegeneracyWarning::NonPositiveFluctuation {
            scale,
            segments: non_positive,
        });
    }

    let undefined = segments
        .signs
        .iter()
        .filter(|&&s| s == TrendSign::Undefined)
        .count();
    if undefined > 0 {
        warn!("scale {}: {} segment(s) with undefined trend slope", scale, undefined);
        warnings.push(DegeneracyWarning::UndefinedTrend {
            scale,
            segments: undefined,
        });
    }

    for (class, count) in [
        (TrendClass::Positive, segments.m_plus),
        (TrendClass::Negative, segments.m_minus),
    ] {
        if count == 0.0 {
            warn!("scale {}: no {} trend segments", scale, class);
            warnings.push(DegeneracyWarning::EmptyTrendClass { scale, class });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Seeded uniform noise on `[-0.5, 0.5)`.
    fn noisy_series(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen::<f64>() - 0.5).collect()
    }

    #[test]
    fn test_qth_order_fluctuation_uniform_weights() {
        let f = vec![1.0, 4.0, 9.0];
        let w = vec![1.0; 3];
        // q = 2: sqrt(mean(f))
        assert_approx_eq!(qth_order_fluctuation(&f, &w, 2.0), (14.0f64 / 3.0).sqrt(), 1e-12);
        // q = 0: exp(mean(ln f) / 2) = geometric mean of sqrt(f)
        assert_approx_eq!(qth_order_fluctuation(&f, &w, 0.0), 6.0f64.powf(1.0 / 3.0), 1e-12);
    }

    #[test]
    fn test_qth_order_fluctuation_weighted() {
        let f = vec![1.0, 4.0, 9.0, 16.0];
        let w = vec![1.0, 0.0, 0.5, 1.0];
        // (1·1 + 0·4 + 0.5·9 + 1·16) / 2.5, then ^(1/2)
        let expected = (21.5f64 / 2.5).sqrt();
        assert_approx_eq!(qth_order_fluctuation(&f, &w, 2.0), expected, 1e-12);
    }

    #[test]
    fn test_qth_order_fluctuation_empty_class_is_nan() {
        let f = vec![1.0, 4.0];
        let w = vec![0.0, 0.0];
        assert!(qth_order_fluctuation(&f, &w, 2.0).is_nan());
        assert!(qth_order_fluctuation(&f, &w, 0.0).is_nan());
        assert!(qth_order_fluctuation(&f, &w, -2.0).is_nan());
    }

    #[test]
    fn test_q_zero_is_limit_of_general_formula() {
        let f: Vec<f64> = noisy_series(50, 3).iter().map(|v| v.abs() + 0.01).collect();
        let w = vec![1.0; f.len()];
        let log_average = qth_order_fluctuation(&f, &w, 0.0);
        for q in [1e-6, -1e-6] {
            let general = qth_order_fluctuation(&f, &w, q);
            assert!(
                ((general - log_average) / log_average).abs() < 1e-4,
                "q={}: {} vs {}",
                q,
                general,
                log_average
            );
        }
    }

    #[test]
    fn test_weight_completeness_per_scale() {
        let x = noisy_series(600, 11);
        let y = noisy_series(600, 12);
        let config = DccaConfig::new(&[2.0]).with_asymmetry_base(AsymmetryBase::Return);
        let result = dcca_with_config(&x, &y, &[20, 35, 60], &config).unwrap();

        for counts in &result.segment_counts {
            assert_eq!(counts.segments, 2 * (600 / counts.scale));
            assert_eq!(counts.m_plus + counts.m_minus, counts.segments as f64);
        }
    }

    #[test]
    fn test_full_matrix_is_returned() {
        let x = noisy_series(800, 5);
        let y = noisy_series(800, 6);
        let q_values = [-3.0, 0.0, 3.0];
        let scales = [20, 40, 80];
        let result = dcca_with_config(&x, &y, &scales, &DccaConfig::new(&q_values)).unwrap();

        for class in [TrendClass::Overall, TrendClass::Positive, TrendClass::Negative] {
            let r = result.class(class);
            assert_eq!(r.fluctuations.len(), 3);
            assert!(r.fluctuations.iter().all(|row| row.len() == 3));
            assert_eq!(r.hurst_exponents.len(), 3);
        }
        // Distinct q give distinct rows
        assert_ne!(result.overall.fluctuations[0], result.overall.fluctuations[2]);
    }

    #[test]
    fn test_seeded_inputs_give_identical_results() {
        assert_eq!(noisy_series(100, 8), noisy_series(100, 8));
        assert_ne!(noisy_series(100, 8), noisy_series(100, 9));

        let config = DccaConfig::new(&[-2.0, 2.0]);
        let run = || {
            let x = noisy_series(600, 8);
            let y = noisy_series(600, 9);
            dcca_with_config(&x, &y, &[20, 60], &config).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_segment_warnings_are_counted_per_scale() {
        let segments = ScaleSegments {
            scale: 10,
            fluctuations: vec![0.5, 0.0, -1e-18, f64::NAN, 2.0, 0.0],
            signs: vec![
                TrendSign::Positive,
                TrendSign::Undefined,
                TrendSign::Positive,
                TrendSign::Undefined,
                TrendSign::Flat,
                TrendSign::Positive,
            ],
            m_plus: f64::NAN,
            m_minus: f64::NAN,
        };
        let mut warnings = Vec::new();
        collect_segment_warnings(&segments, &mut warnings);

        assert_eq!(
            warnings,
            vec![
                DegeneracyWarning::NonPositiveFluctuation {
                    scale: 10,
                    segments: 4,
                },
                DegeneracyWarning::UndefinedTrend {
                    scale: 10,
                    segments: 2,
                },
            ]
        );
    }

    #[test]
    fn test_mfdfa_ignores_y() {
        let x = noisy_series(500, 21);
        let config = DccaConfig::new(&[2.0]);
        let single = mfdfa_with_config(&x, &[20, 40, 80], &config).unwrap();
        let cross = dcca_with_config(&x, &x, &[20, 40, 80], &config).unwrap();
        // |a|·|a| == a² so DFA and DCCA agree for identical inputs
        for (a, b) in single.overall.fluctuations[0]
            .iter()
            .zip(&cross.overall.fluctuations[0])
        {
            assert_approx_eq!(a, b, 1e-12 * b.abs());
        }
    }
}
