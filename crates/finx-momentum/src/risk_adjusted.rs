//! Method B: volatility-adjusted returns, z-scored across the universe.
//!
//! The five most recent bars are skipped to sidestep short-term reversal.
//! With `n` closes and `c = close`:
//!
//! | Horizon | Return | Scaled by |
//! |---------|--------|-----------|
//! | 3m | `c[n-6] / c[n-64] - 1` | annualized sample std of the daily returns in the window |
//! | 1m | `c[n-6] / c[n-22] - 1` | same, over the 1m window |
//! | 1w | `c[n-6] / c[n-11] - 1` | nothing |
//!
//! `composite = 0.40 z_3m + 0.35 z_1m + 0.25 z_1w`.

use finx_core::stats::{cross_sectional_zscores, sample_std};
use finx_core::{Symbol, SymbolSeries, DEGENERATE_STD};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ranking::{rank_and_order, MomentumConfig};

pub const WEIGHT_3M: f64 = 0.40;
pub const WEIGHT_1M: f64 = 0.35;
pub const WEIGHT_1W: f64 = 0.25;

const SKIP_RECENT: usize = 5;
const TRADING_DAYS: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustedRecord {
    pub symbol: Symbol,
    pub ret_3m: f64,
    pub ret_1m: f64,
    pub ret_1w: f64,
    pub z_3m: f64,
    pub z_1m: f64,
    pub z_1w: f64,
    pub composite: f64,
    pub rank: u8,
}

/// Per-symbol inputs to the cross-sectional step.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonReturns {
    pub ret_3m: f64,
    pub ret_1m: f64,
    pub ret_1w: f64,
    pub ra_3m: f64,
    pub ra_1m: f64,
    pub ra_1w: f64,
}

fn simple_return(from: f64, to: f64) -> f64 {
    if from > 0.0 {
        to / from - 1.0
    } else {
        0.0
    }
}

fn annualized_vol(returns: &[f64]) -> f64 {
    sample_std(returns).map_or(0.0, |std| std * TRADING_DAYS.sqrt())
}

fn scale(ret: f64, vol: f64) -> f64 {
    if vol > DEGENERATE_STD {
        ret / vol
    } else {
        0.0
    }
}

/// Horizon returns for one close series; `None` when it is shorter than
/// `min_history`.
pub fn horizon_returns(closes: &[f64], config: &MomentumConfig) -> Option<HorizonReturns> {
    let n = closes.len();
    if n < config.min_history || n < 65 {
        return None;
    }

    let anchor = closes[n - 1 - SKIP_RECENT];
    let ret_3m = simple_return(closes[n - 64], anchor);
    let ret_1m = simple_return(closes[n - 22], anchor);
    let ret_1w = simple_return(closes[n - 11], anchor);

    let daily: Vec<f64> = closes
        .windows(2)
        .map(|pair| simple_return(pair[0], pair[1]))
        .collect();
    let vol_3m = annualized_vol(&daily[n - 64..n - SKIP_RECENT]);
    let vol_1m = annualized_vol(&daily[n - 22..n - SKIP_RECENT]);

    Some(HorizonReturns {
        ret_3m,
        ret_1m,
        ret_1w,
        ra_3m: scale(ret_3m, vol_3m),
        ra_1m: scale(ret_1m, vol_1m),
        ra_1w: ret_1w,
    })
}

/// Rank every qualifying symbol. Symbols with too little history are left
/// out; the rest come back strongest first.
pub fn rank_risk_adjusted(
    universe: &[SymbolSeries],
    config: &MomentumConfig,
) -> Vec<RiskAdjustedRecord> {
    let mut symbols = Vec::new();
    let mut inputs = Vec::new();
    for series in universe {
        match horizon_returns(&series.closes(), config) {
            Some(returns) => {
                symbols.push(series.symbol().clone());
                inputs.push(returns);
            }
            None => debug!(
                symbol = %series.symbol(),
                bars = series.len(),
                min = config.min_history,
                "insufficient history for risk-adjusted momentum"
            ),
        }
    }

    let column = |pick: fn(&HorizonReturns) -> f64| -> Vec<f64> {
        let values: Vec<f64> = inputs.iter().map(pick).collect();
        cross_sectional_zscores(&values, config.z_clip)
    };
    let z_3m = column(|r| r.ra_3m);
    let z_1m = column(|r| r.ra_1m);
    let z_1w = column(|r| r.ra_1w);

    let records: Vec<RiskAdjustedRecord> = symbols
        .into_iter()
        .zip(&inputs)
        .enumerate()
        .map(|(i, (symbol, returns))| RiskAdjustedRecord {
            symbol,
            ret_3m: returns.ret_3m,
            ret_1m: returns.ret_1m,
            ret_1w: returns.ret_1w,
            z_3m: z_3m[i],
            z_1m: z_1m[i],
            z_1w: z_1w[i],
            composite: WEIGHT_3M * z_3m[i] + WEIGHT_1M * z_1m[i] + WEIGHT_1W * z_1w[i],
            rank: 0,
        })
        .collect();

    info!(
        ranked = records.len(),
        universe = universe.len(),
        "risk-adjusted momentum ranked"
    );
    rank_and_order(records, |r| r.composite, |r, rank| r.rank = rank)
}
