//! Polynomial least-squares detrending.
//!
//! Every segment of a given scale is fitted over the same local index
//! `1..=s`, so the design matrix and its pseudo-inverse depend on the scale
//! only. [`PolynomialDetrender`] builds them once per scale and reuses them for
//! all segments.

use crate::errors::{DccaError, DccaResult};
use nalgebra::{DMatrix, DVector};

/// Singular values below this are treated as zero when inverting the design matrix.
const SINGULAR_VALUE_EPSILON: f64 = 1e-10;

/// Degree-`order` least-squares polynomial fit over a fixed window length.
///
/// The local index is centered and scaled to `[-1, 1]` before building the
/// Vandermonde basis, which keeps the normal equations well conditioned for
/// long windows. Residuals do not depend on this reparametrisation.
#[derive(Debug, Clone)]
pub struct PolynomialDetrender {
    order: usize,
    basis: DMatrix<f64>,
    projector: DMatrix<f64>,
}

impl PolynomialDetrender {
    /// Build the detrender for windows of `len` points.
    ///
    /// A window shorter than `order + 1` is accepted: the fit interpolates the
    /// points exactly (minimum-norm solution) and every residual is zero.
    pub fn new(len: usize, order: usize) -> DccaResult<Self> {
        if len == 0 {
            return Err(DccaError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let center = (len as f64 + 1.0) / 2.0;
        let half_width = if len > 1 { (len as f64 - 1.0) / 2.0 } else { 1.0 };

        let basis = DMatrix::from_fn(len, order + 1, |row, col| {
            let t = (row as f64 + 1.0 - center) / half_width;
            t.powi(col as i32)
        });

        let projector = basis
            .clone()
            .pseudo_inverse(SINGULAR_VALUE_EPSILON)
            .map_err(|reason| DccaError::NumericalError {
                reason: format!("polynomial design matrix inversion failed: {}", reason),
            })?;

        Ok(Self {
            order,
            basis,
            projector,
        })
    }

    /// Window length this detrender was built for.
    pub fn window_len(&self) -> usize {
        self.basis.nrows()
    }

    /// Polynomial degree.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Whether the window has fewer points than polynomial coefficients.
    pub fn is_underdetermined(&self) -> bool {
        self.window_len() < self.order + 1
    }

    /// Fitted trend values over the window.
    pub fn trend(&self, segment: &[f64]) -> Vec<f64> {
        debug_assert_eq!(segment.len(), self.window_len());
        let y = DVector::from_column_slice(segment);
        let coefficients = &self.projector * y;
        (&self.basis * coefficients).iter().copied().collect()
    }

    /// Detrended values `segment - trend(segment)`.
    pub fn residuals(&self, segment: &[f64]) -> Vec<f64> {
        segment
            .iter()
            .zip(self.trend(segment))
            .map(|(y, fitted)| y - fitted)
            .collect()
    }
}

/// Fit a polynomial of the given order over `1..=segment.len()` and return
/// the residuals.
pub fn polynomial_residuals(segment: &[f64], order: usize) -> DccaResult<Vec<f64>> {
    Ok(PolynomialDetrender::new(segment.len(), order)?.residuals(segment))
}
