//! # finx Momentum
//!
//! Two independent cross-sectional rankings of a symbol universe. Both need
//! every series before they can rank, so callers run them after any
//! per-symbol fan-out has joined.
//!
//! | Method | Module | Inputs per symbol | Composite |
//! |--------|--------|-------------------|-----------|
//! | B | [`risk_adjusted`] | 3m/1m/1w returns, skipping the last 5 bars | weighted clipped z-scores |
//! | C | [`clenow`] | log-price regression over 63/21/10 bars | weighted `annualized × R²` |
//!
//! Ranks are integers in `0..=99` derived from the average rank of the
//! composite. A universe of one sits at 50. Records come back strongest
//! first.
//!
//! ```rust
//! use finx_momentum::clenow::clenow_score;
//!
//! let closes: Vec<f64> = (0..63).map(|i| 100.0 * 1.001_f64.powi(i)).collect();
//! let score = clenow_score(&closes, 63).expect("63 positive closes");
//! assert!((score - (1.001_f64.powi(252) - 1.0)).abs() < 1e-9);
//! ```

pub mod clenow;
pub mod ranking;
pub mod risk_adjusted;

pub use clenow::{clenow_score, rank_clenow, ClenowRecord};
pub use ranking::{MomentumConfig, MIN_HISTORY};
pub use risk_adjusted::{horizon_returns, rank_risk_adjusted, HorizonReturns, RiskAdjustedRecord};
