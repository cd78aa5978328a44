//! Mathematical utility functions shared by the estimator.
//!
//! Everything here propagates NaN instead of failing: degeneracy is reported by
//! the caller, the arithmetic itself never aborts an analysis.

/// Arithmetic mean. NaN for empty input.
#[inline]
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Integrate a series into its profile.
///
/// Computes the cumulative sum of deviations from the mean, the standard
/// profile of DFA-family methods.
///
/// # Arguments
/// * `data` - Input time series
///
/// # Returns
/// Integrated (cumulative sum) series with mean removed
pub fn integrate_series(data: &[f64]) -> Vec<f64> {
    let mean = mean(data);
    let mut integrated = vec![0.0; data.len()];
    let mut cumsum = 0.0;

    for (i, &value) in data.iter().enumerate() {
        cumsum += value - mean;
        integrated[i] = cumsum;
    }

    integrated
}

/// Plain cumulative sum, without mean removal.
pub fn cumulative_sum(data: &[f64]) -> Vec<f64> {
    data.iter()
        .scan(0.0, |acc, &value| {
            *acc += value;
            Some(*acc)
        })
        .collect()
}

/// Least-squares slope of `y` against `x`.
///
/// Uses centered sums for numerical stability. Returns NaN when `x` has no
/// spread or when any input is NaN, so degenerate regressions stay visible in
/// the output instead of aborting the analysis.
///
/// # Example
/// ```rust
/// use mf_adcca::math_utils::linear_slope;
///
/// let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
/// assert!((linear_slope(&x, &y) - 2.0).abs() < 1e-12);
/// ```
pub fn linear_slope(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    if x.len() < 2 {
        return f64::NAN;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let (sxy, sxx) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(sxy, sxx), (&xi, &yi)| {
            let dx = xi - mean_x;
            (sxy + dx * (yi - mean_y), sxx + dx * dx)
        });

    if sxx == 0.0 {
        return f64::NAN;
    }
    sxy / sxx
}

/// Slope of a linear trend fitted to `segment` over the local index `1..=s`.
///
/// The index sums have closed forms, so only `Σy` and `Σjy` are accumulated.
/// A segment of fewer than two points has no direction and yields `0.0`.
pub fn index_slope(segment: &[f64]) -> f64 {
    let n = segment.len();
    if n < 2 {
        return 0.0;
    }

    let n_f64 = n as f64;
    // Centered index: j - (n + 1) / 2 for j = 1..=n
    let center = (n_f64 + 1.0) / 2.0;
    // Σ(j - center)² = n(n² - 1) / 12
    let sxx = n_f64 * (n_f64 * n_f64 - 1.0) / 12.0;

    let sxy: f64 = segment
        .iter()
        .enumerate()
        .map(|(i, &y)| (i as f64 + 1.0 - center) * y)
        .sum();

    sxy / sxx
}

/// Scaling exponent: slope of `ln(values)` against `ln(scales)`.
///
/// Non-positive or non-finite values produce NaN, as does a scale set with
/// fewer than two distinct scales.
pub fn log_log_slope(scales: &[usize], values: &[f64]) -> f64 {
    let log_s: Vec<f64> = scales.iter().map(|&s| (s as f64).ln()).collect();
    let log_v: Vec<f64> = values.iter().map(|&v| v.ln()).collect();
    linear_slope(&log_s, &log_v)
}

/// Number of distinct values in a scale set.
pub fn distinct_count(scales: &[usize]) -> usize {
    let mut sorted = scales.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}
