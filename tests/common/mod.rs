//! Shared helpers for integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Reproducible Gaussian noise.
pub fn gaussian_noise(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
}

/// Return-like series with volatility clustering, and its absolute-value
/// volatility proxy.
pub fn returns_and_volatility(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let noise = gaussian_noise(n, seed);
    let mut returns = Vec::with_capacity(n);
    let mut previous: f64 = 0.0;
    for z in noise {
        let volatility = 0.01 + 0.3 * previous.abs();
        let r = volatility * z;
        returns.push(r);
        previous = r;
    }
    let volatility = returns.iter().map(|r| r.abs()).collect();
    (returns, volatility)
}

/// Bit patterns, for exact comparisons that treat NaN == NaN.
pub fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

/// Bit patterns of a `[q][s]` matrix.
pub fn matrix_bits(matrix: &[Vec<f64>]) -> Vec<Vec<u64>> {
    matrix.iter().map(|row| bits(row)).collect()
}
