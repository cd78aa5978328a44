//! Segmentation of profiles and per-segment statistics.
//!
//! For a scale `s` over a series of length `N` there are `Ns = N / s`
//! non-overlapping windows taken from the start (forward) and `Ns` more taken
//! from the end (reverse), so the tail remainder `N - Ns·s` is covered too.
//! Segments are numbered `v = 1..=2·Ns`; forward segments come first.

use crate::config::FluctuationKind;
use crate::linear_algebra::PolynomialDetrender;
use crate::math_utils::index_slope;
use std::ops::Range;

/// Which end of the series a segment is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Windows laid out from index 0
    Forward,
    /// Windows laid out backwards from index N
    Reverse,
}

/// A contiguous window of one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentWindow {
    /// Segment number `v`, 1-based over all `2·Ns` segments
    pub index: usize,
    /// Anchoring direction
    pub direction: Direction,
    /// First sample of the window
    pub start: usize,
    /// Window length (the scale)
    pub len: usize,
}

impl SegmentWindow {
    /// Sample range covered by the window.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The window applied to a series of the analysed length.
    pub fn slice<'a>(&self, data: &'a [f64]) -> &'a [f64] {
        &data[self.range()]
    }
}

/// Number of whole segments of length `scale` in `n` samples.
#[inline]
pub fn segment_count(n: usize, scale: usize) -> usize {
    n / scale
}

/// Window for segment `v` of `scale` over `n` samples.
///
/// Forward segments (`v = 1..=Ns`) start at `(v - 1)·s`. Reverse segments
/// (`v = Ns+1..=2·Ns`) start at `N - (v - Ns)·s`, with `Ns` taken from this
/// scale.
pub fn segment_window(v: usize, scale: usize, n: usize, direction: Direction) -> SegmentWindow {
    let ns = segment_count(n, scale);
    let start = match direction {
        Direction::Forward => {
            debug_assert!((1..=ns).contains(&v));
            (v - 1) * scale
        }
        Direction::Reverse => {
            debug_assert!((ns + 1..=2 * ns).contains(&v));
            n - (v - ns) * scale
        }
    };

    SegmentWindow {
        index: v,
        direction,
        start,
        len: scale,
    }
}

/// All `2·Ns` windows of one scale, forward segments first.
pub fn segment_windows(n: usize, scale: usize) -> Vec<SegmentWindow> {
    let ns = segment_count(n, scale);
    (1..=ns)
        .map(|v| segment_window(v, scale, n, Direction::Forward))
        .chain((ns + 1..=2 * ns).map(|v| segment_window(v, scale, n, Direction::Reverse)))
        .collect()
}

/// Detrended fluctuation of one segment.
///
/// Removes the polynomial trend from the `x` and `y` profile windows and
/// averages the product of the residual magnitudes (or the squared residuals
/// of a single series for the auto-fluctuation kinds).
pub fn segment_fluctuation(
    window: &SegmentWindow,
    x_profile: &[f64],
    y_profile: &[f64],
    detrender: &PolynomialDetrender,
    kind: FluctuationKind,
) -> f64 {
    let len = window.len as f64;
    match kind {
        FluctuationKind::CrossCorrelation => {
            let rx = detrender.residuals(window.slice(x_profile));
            let ry = detrender.residuals(window.slice(y_profile));
            rx.iter().zip(&ry).map(|(a, b)| a.abs() * b.abs()).sum::<f64>() / len
        }
        FluctuationKind::AutoX => {
            let rx = detrender.residuals(window.slice(x_profile));
            rx.iter().map(|r| r * r).sum::<f64>() / len
        }
        FluctuationKind::AutoY => {
            let ry = detrender.residuals(window.slice(y_profile));
            ry.iter().map(|r| r * r).sum::<f64>() / len
        }
    }
}

/// Slope of the linear trend of the reference series over one segment.
#[inline]
pub fn trend_slope(window: &SegmentWindow, reference: &[f64]) -> f64 {
    index_slope(window.slice(reference))
}

/// Direction of a segment's local trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSign {
    /// Slope > 0
    Positive,
    /// Slope < 0
    Negative,
    /// Slope == 0: half the segment's weight goes to each side
    Flat,
    /// Slope is NaN: both weights are NaN
    Undefined,
}

impl TrendSign {
    /// Classify a slope.
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendSign::Positive
        } else if slope < 0.0 {
            TrendSign::Negative
        } else if slope == 0.0 {
            TrendSign::Flat
        } else {
            TrendSign::Undefined
        }
    }

    /// `(1 + sign) / 2`
    pub fn positive_weight(self) -> f64 {
        match self {
            TrendSign::Positive => 1.0,
            TrendSign::Negative => 0.0,
            TrendSign::Flat => 0.5,
            TrendSign::Undefined => f64::NAN,
        }
    }

    /// `(1 - sign) / 2`
    pub fn negative_weight(self) -> f64 {
        match self {
            TrendSign::Positive => 0.0,
            TrendSign::Negative => 1.0,
            TrendSign::Flat => 0.5,
            TrendSign::Undefined => f64::NAN,
        }
    }
}

/// Segment statistics of one scale, independent of q.
#[derive(Debug, Clone)]
pub struct ScaleSegments {
    /// Segment length
    pub scale: usize,
    /// Fluctuation of each of the `2·Ns` segments
    pub fluctuations: Vec<f64>,
    /// Trend classification of each segment
    pub signs: Vec<TrendSign>,
    /// Soft count of positive-trend segments
    pub m_plus: f64,
    /// Soft count of negative-trend segments
    pub m_minus: f64,
}

impl ScaleSegments {
    /// Compute fluctuations and trend signs for every segment of `scale`.
    pub fn compute(
        scale: usize,
        x_profile: &[f64],
        y_profile: &[f64],
        reference: &[f64],
        detrender: &PolynomialDetrender,
        kind: FluctuationKind,
    ) -> Self {
        let windows = segment_windows(x_profile.len(), scale);

        let fluctuations: Vec<f64> = windows
            .iter()
            .map(|w| segment_fluctuation(w, x_profile, y_profile, detrender, kind))
            .collect();

        let signs: Vec<TrendSign> = windows
            .iter()
            .map(|w| TrendSign::from_slope(trend_slope(w, reference)))
            .collect();

        let expected = 2 * segment_count(x_profile.len(), scale);
        assert_eq!(fluctuations.len(), expected, "{} segments", fluctuations.len());
        assert_eq!(signs.len(), expected, "{} segments", signs.len());

        let m_plus = signs.iter().map(|s| s.positive_weight()).sum();
        let m_minus = signs.iter().map(|s| s.negative_weight()).sum();

        Self {
            scale,
            fluctuations,
            signs,
            m_plus,
            m_minus,
        }
    }

    /// Number of segments (`2·Ns`).
    pub fn segment_count(&self) -> usize {
        self.fluctuations.len()
    }
}
