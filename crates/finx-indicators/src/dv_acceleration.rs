//! Dollar-volume acceleration: mean traded value of the last 5 bars against
//! the last 20.

use finx_core::stats::mean;
use finx_core::{Symbol, SymbolSeries, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SHORT_WINDOW: usize = 5;
pub const LONG_WINDOW: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DvConfig {
    /// Signal fires when `ratio > threshold`.
    pub threshold: f64,
}

impl Default for DvConfig {
    fn default() -> Self {
        Self { threshold: 1.5 }
    }
}

impl DvConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ValidationError::parameter(
                "dv.threshold",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DvAcceleration {
    pub symbol: Symbol,
    pub dv_5d: f64,
    pub dv_20d: f64,
    pub ratio: f64,
    pub signal: bool,
}

/// `None` with fewer than 20 bars or a zero 20-day mean.
pub fn dv_acceleration(series: &SymbolSeries, config: &DvConfig) -> Option<DvAcceleration> {
    let dv = series.dollar_volumes();
    if dv.len() < LONG_WINDOW {
        debug!(
            symbol = %series.symbol(),
            bars = dv.len(),
            "dv acceleration needs {LONG_WINDOW} bars"
        );
        return None;
    }

    let dv_5d = mean(&dv[dv.len() - SHORT_WINDOW..])?;
    let dv_20d = mean(&dv[dv.len() - LONG_WINDOW..])?;
    if dv_20d == 0.0 || !dv_20d.is_finite() {
        debug!(symbol = %series.symbol(), "20-day dollar volume is zero");
        return None;
    }

    let ratio = dv_5d / dv_20d;
    Some(DvAcceleration {
        symbol: series.symbol().clone(),
        dv_5d,
        dv_20d,
        ratio,
        signal: ratio > config.threshold,
    })
}

pub(crate) fn sort_by_ratio(results: &mut [DvAcceleration]) {
    results.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
}
