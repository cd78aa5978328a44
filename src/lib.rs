//! # Multifractal Asymmetric DCCA
//!
//! Multifractal asymmetric detrended cross-correlation analysis (MF-A-DCCA)
//! of two time series, e.g. price returns and volatility.
//!
//! The integrated series are cut into segments at several scales, a local
//! polynomial trend is removed from each segment, and the residual
//! cross-fluctuation is measured. Segments are also classified by the sign of
//! a local linear trend in a reference series. Aggregating over segments gives
//! q-th order fluctuation functions `F_q(s)`, and their log-log scaling against
//! `s` gives generalized Hurst exponents `H(q)` for all segments and for the
//! positive- and negative-trend segments separately.
//!
//! The same machinery covers DFA, DCCA, A-DFA, A-DCCA, MF-DFA, MF-DCCA and
//! A-MFDFA through [`FluctuationKind`] and the choice of q values.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mf_adcca::{basic_dcca, TrendClass};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let returns: Vec<f64> = (0..5_000).map(|i| (i as f64 * 0.37).sin() * 0.01).collect();
//!     let volatility: Vec<f64> = returns.iter().map(|r| r.abs()).collect();
//!
//!     let q_values = [-2.0, 0.0, 2.0];
//!     let result = basic_dcca(&returns, &volatility, &q_values, 2, None, false, 100, "index")?;
//!
//!     for class in [TrendClass::Overall, TrendClass::Positive, TrendClass::Negative] {
//!         println!("{}: H(2) = {:?}", class, result.class(class).hurst_for(2.0));
//!     }
//!     println!("ΔH(q) = {:?}", result.asymmetry_degree());
//!     Ok(())
//! }
//! ```
//!
//! ## Numeric degeneracy
//!
//! Malformed input is rejected with a [`DccaError`]. Degenerate but valid input
//! (a trend class without segments at some scale, a zero fluctuation) does not
//! abort the analysis: the affected cells are NaN and the cause is listed in
//! [`AsymmetricDccaAnalysis::warnings`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod errors;
pub mod linear_algebra;
pub mod math_utils;
pub mod multifractal;
pub mod profile;
pub mod results;
pub mod scales;
pub mod segments;

pub use config::{
    AsymmetryBase, DccaConfig, FluctuationKind, ProfileMode, ScaleRangeConfig, DEFAULT_Q_VALUES,
};
pub use errors::{DccaError, DccaResult};
pub use multifractal::{dcca, dcca_with_config, mfdfa_with_config, qth_order_fluctuation};
pub use profile::{build_profile, build_profiles, build_trend_reference};
pub use results::{
    AsymmetricDccaAnalysis, DccaTuple, DegeneracyWarning, SegmentCounts, TrendClass,
    TrendClassResult,
};
pub use scales::{basic_dcca, basic_dcca_with_config, generate_scale_range};
pub use segments::{
    segment_fluctuation, segment_window, segment_windows, trend_slope, Direction,
    ScaleSegments, SegmentWindow, TrendSign,
};
