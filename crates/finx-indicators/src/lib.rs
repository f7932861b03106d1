//! # finx Indicators
//!
//! Per-symbol oscillators over a daily [`SymbolSeries`](finx_core::SymbolSeries).
//!
//! | Module | Indicator | History needed |
//! |--------|-----------|----------------|
//! | [`pmarp`] | Percentile of close/EMA ratio | `lookback + ema_period` bars |
//! | [`rvol`] | Volume z-score and sustained runs | `lookback + 1` bars |
//! | [`dv_acceleration`] | 5-day / 20-day dollar volume | 20 bars |
//! | [`engine`] | All of the above, summaries and scans | - |
//! | [`batch`] | Bounded worker pool fan-out | - |
//!
//! Short history yields `None` rather than an error.
//!
//! ```rust
//! use finx_indicators::rvol::rvol_latest;
//!
//! // history 1, 3 -> mean 2, population std 1
//! assert_eq!(rvol_latest(&[1.0, 3.0, 6.0], 2), Some(4.0));
//! assert_eq!(rvol_latest(&[1.0, 3.0], 2), None);
//! ```

pub mod batch;
pub mod dv_acceleration;
pub mod engine;
pub mod pmarp;
pub mod rvol;

pub use batch::{map_symbols, BatchConfig};
pub use dv_acceleration::{dv_acceleration, DvAcceleration, DvConfig};
pub use engine::{
    run_all, run_dv_scan, run_indicators, scan_sustained, summarize, IndicatorConfig,
    IndicatorReport, IndicatorSummary, LeaderboardEntry, SustainedHit,
};
pub use pmarp::{analyze_pmarp, pmarp_series, PmarpAnalysis, PmarpConfig, PmarpSignal};
pub use rvol::{
    analyze_rvol, analyze_sustained, rvol_latest, rvol_series, sustained_run, RvolAnalysis,
    RvolConfig, RvolSignal, SustainedLevel, SustainedRun,
};
