//! Method C: exponential-regression momentum.
//!
//! Each window fits `ln(close)` against the bar index; the daily log slope is
//! annualized over 252 sessions and multiplied by the fit's R², so a steady
//! trend outranks a noisy one with the same endpoints.

use finx_core::stats::fit_against_index;
use finx_core::{Symbol, SymbolSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ranking::{rank_and_order, MomentumConfig};

/// `(window, weight)` pairs, longest first.
pub const WINDOWS: [(usize, f64); 3] = [(63, 0.50), (21, 0.30), (10, 0.20)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClenowRecord {
    pub symbol: Symbol,
    pub clenow_63d: f64,
    pub clenow_21d: f64,
    pub clenow_10d: f64,
    pub composite: f64,
    pub rank: u8,
}

/// Annualized regression slope of the trailing `window` closes, times R².
///
/// `None` when the window cannot be fitted: the series is shorter than the
/// window, or a close in it is not a positive finite number. A fit whose
/// score overflows counts as 0.
pub fn clenow_score(closes: &[f64], window: usize) -> Option<f64> {
    if window < 2 || closes.len() < window {
        return None;
    }
    let tail = &closes[closes.len() - window..];
    if tail.iter().any(|p| !p.is_finite() || *p <= 0.0) {
        return None;
    }

    let logs: Vec<f64> = tail.iter().map(|p| p.ln()).collect();
    let fit = fit_against_index(&logs)?;
    let score = (fit.slope.exp().powi(252) - 1.0) * fit.r_squared;
    Some(if score.is_finite() { score } else { 0.0 })
}

/// Rank every symbol with enough history. A window that cannot be fitted
/// scores 0; a symbol none of whose windows can be fitted is left out.
pub fn rank_clenow(universe: &[SymbolSeries], config: &MomentumConfig) -> Vec<ClenowRecord> {
    let records: Vec<ClenowRecord> = universe
        .iter()
        .filter_map(|series| {
            if series.len() < config.min_history {
                debug!(
                    symbol = %series.symbol(),
                    bars = series.len(),
                    min = config.min_history,
                    "insufficient history for regression momentum"
                );
                return None;
            }
            let closes = series.closes();
            let scores = WINDOWS.map(|(window, _)| clenow_score(&closes, window));
            if scores.iter().all(Option::is_none) {
                debug!(
                    symbol = %series.symbol(),
                    "no regression window has positive finite prices"
                );
                return None;
            }
            let [c63, c21, c10] = scores.map(|score| score.unwrap_or(0.0));
            let composite = WINDOWS[0].1 * c63 + WINDOWS[1].1 * c21 + WINDOWS[2].1 * c10;
            Some(ClenowRecord {
                symbol: series.symbol().clone(),
                clenow_63d: c63,
                clenow_21d: c21,
                clenow_10d: c10,
                composite,
                rank: 0,
            })
        })
        .collect();

    info!(
        ranked = records.len(),
        universe = universe.len(),
        "regression momentum ranked"
    );
    rank_and_order(records, |r| r.composite, |r, rank| r.rank = rank)
}
