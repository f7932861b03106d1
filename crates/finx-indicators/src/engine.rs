//! Runs every per-symbol indicator in one pass and condenses a universe of
//! reports into signal buckets and leaderboards.

use std::collections::BTreeMap;

use finx_core::{Symbol, SymbolSeries, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::batch::{map_symbols, BatchConfig};
use crate::dv_acceleration::{dv_acceleration, sort_by_ratio, DvAcceleration, DvConfig};
use crate::pmarp::{analyze_pmarp, PmarpAnalysis, PmarpConfig, PmarpSignal};
use crate::rvol::{
    analyze_rvol, analyze_sustained, RvolAnalysis, RvolConfig, RvolSignal, SustainedLevel,
    SustainedRun,
};

const LEADERBOARD_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub pmarp: PmarpConfig,
    pub rvol: RvolConfig,
    pub dv: DvConfig,
    pub batch: BatchConfig,
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.pmarp.validate()?;
        self.rvol.validate()?;
        self.dv.validate()?;
        self.batch.validate()
    }
}

/// Everything known about one symbol's latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport {
    pub symbol: Symbol,
    pub pmarp: Option<PmarpAnalysis>,
    pub rvol: Option<RvolAnalysis>,
    pub sustained: Option<SustainedRun>,
    pub dv: Option<DvAcceleration>,
    /// `pmarp:<signal>` / `rvol:<signal>` tags for non-neutral readings.
    pub signals: Vec<String>,
}

impl IndicatorReport {
    /// True when no indicator had enough history.
    pub fn is_insufficient(&self) -> bool {
        self.pmarp.is_none() && self.rvol.is_none() && self.dv.is_none()
    }
}

pub fn run_indicators(series: &SymbolSeries, config: &IndicatorConfig) -> IndicatorReport {
    let closes = series.closes();
    let volumes = series.volumes();

    let pmarp = analyze_pmarp(&closes, &config.pmarp);
    let rvol = analyze_rvol(&volumes, &config.rvol);
    let sustained = analyze_sustained(&volumes, &config.rvol);
    let dv = dv_acceleration(series, &config.dv);

    let mut signals = Vec::new();
    if let Some(analysis) = &pmarp {
        if analysis.signal != PmarpSignal::Neutral {
            signals.push(format!("pmarp:{}", analysis.signal.as_str()));
        }
    }
    if let Some(analysis) = &rvol {
        if analysis.signal != RvolSignal::Normal {
            signals.push(format!("rvol:{}", analysis.signal.as_str()));
        }
    }

    IndicatorReport {
        symbol: series.symbol().clone(),
        pmarp,
        rvol,
        sustained,
        dv,
        signals,
    }
}

pub fn run_all(
    series: &[SymbolSeries],
    config: &IndicatorConfig,
) -> BTreeMap<Symbol, IndicatorReport> {
    info!(symbols = series.len(), workers = config.batch.workers, "running indicators");
    map_symbols(series, &config.batch, |s| Some(run_indicators(s, config)))
}

/// Dollar-volume acceleration across a universe, strongest first.
pub fn run_dv_scan(series: &[SymbolSeries], config: &IndicatorConfig) -> Vec<DvAcceleration> {
    let mut results: Vec<DvAcceleration> =
        map_symbols(series, &config.batch, |s| dv_acceleration(s, &config.dv))
            .into_values()
            .collect();
    sort_by_ratio(&mut results);

    let fired = results.iter().filter(|r| r.signal).count();
    info!(
        symbols = results.len(),
        fired,
        threshold = config.dv.threshold,
        "dv acceleration scan complete"
    );
    results
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainedHit {
    pub symbol: Symbol,
    #[serde(flatten)]
    pub run: SustainedRun,
}

/// Symbols currently in a run above the threshold, strongest level first,
/// then by latest RVOL descending.
pub fn scan_sustained(series: &[SymbolSeries], config: &IndicatorConfig) -> Vec<SustainedHit> {
    let runs = map_symbols(series, &config.batch, |s| {
        analyze_sustained(&s.volumes(), &config.rvol)
    });

    let mut hits: Vec<SustainedHit> = runs
        .into_iter()
        .filter(|(_, run)| run.level != SustainedLevel::None)
        .map(|(symbol, run)| SustainedHit { symbol, run })
        .collect();
    hits.sort_by(|a, b| {
        a.run
            .level
            .cmp(&b.run.level)
            .then_with(|| b.run.latest_rvol.total_cmp(&a.run.latest_rvol))
    });

    info!(hits = hits.len(), universe = series.len(), "sustained volume scan complete");
    hits
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub symbol: Symbol,
    pub value: f64,
    pub signal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub total: usize,
    pub with_signals: usize,
    pub insufficient: usize,
    pub signals: BTreeMap<String, Vec<Symbol>>,
    /// Highest PMARP first.
    pub top_pmarp: Vec<LeaderboardEntry>,
    /// Lowest PMARP first.
    pub low_pmarp: Vec<LeaderboardEntry>,
    /// Highest RVOL first.
    pub top_rvol: Vec<LeaderboardEntry>,
}

pub fn summarize<'a>(reports: impl IntoIterator<Item = &'a IndicatorReport>) -> IndicatorSummary {
    let mut summary = IndicatorSummary::default();
    let mut pmarp = Vec::new();
    let mut rvol = Vec::new();

    for report in reports {
        summary.total += 1;
        if report.is_insufficient() {
            summary.insufficient += 1;
            continue;
        }
        if !report.signals.is_empty() {
            summary.with_signals += 1;
        }
        for tag in &report.signals {
            summary
                .signals
                .entry(tag.clone())
                .or_default()
                .push(report.symbol.clone());
        }
        if let Some(analysis) = &report.pmarp {
            pmarp.push(LeaderboardEntry {
                symbol: report.symbol.clone(),
                value: analysis.current,
                signal: analysis.signal.as_str().to_owned(),
            });
        }
        if let Some(analysis) = &report.rvol {
            rvol.push(LeaderboardEntry {
                symbol: report.symbol.clone(),
                value: analysis.current,
                signal: analysis.signal.as_str().to_owned(),
            });
        }
    }

    pmarp.sort_by(|a, b| b.value.total_cmp(&a.value));
    rvol.sort_by(|a, b| b.value.total_cmp(&a.value));

    summary.top_pmarp = pmarp.iter().take(LEADERBOARD_LEN).cloned().collect();
    summary.low_pmarp = pmarp.iter().rev().take(LEADERBOARD_LEN).cloned().collect();
    summary.top_rvol = rvol.into_iter().take(LEADERBOARD_LEN).collect();
    summary
}

#[cfg(test)]
mod tests {
    use finx_core::{Bar, TradeDate};

    use super::*;

    fn series(symbol: &str, closes: &[f64], volumes: &[f64]) -> SymbolSeries {
        let start = TradeDate::parse("2023-01-02").expect("date");
        let bars = closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (c, v))| Bar::new(start.add_days(i as i64), *c, *c, *c, *c, *v).expect("bar"))
            .collect();
        SymbolSeries::new(Symbol::parse(symbol).expect("symbol"), bars).expect("series")
    }

    fn small_config() -> IndicatorConfig {
        IndicatorConfig {
            pmarp: PmarpConfig {
                ema_period: 3,
                lookback: 10,
                ..PmarpConfig::default()
            },
            rvol: RvolConfig {
                lookback: 10,
                ..RvolConfig::default()
            },
            ..IndicatorConfig::default()
        }
    }

    fn breakout_symbol() -> SymbolSeries {
        let mut closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64 * 0.5).collect();
        closes.push(120.0);
        let mut volumes: Vec<f64> = (0..30).map(|i| 1_000.0 + (i % 3) as f64 * 10.0).collect();
        volumes.push(50_000.0);
        series("JUMP", &closes, &volumes)
    }

    #[test]
    fn report_tags_non_neutral_readings() {
        let report = run_indicators(&breakout_symbol(), &small_config());
        assert_eq!(
            report.signals,
            vec!["pmarp:bullish_breakout", "rvol:extreme_volume"]
        );
        let sustained = report.sustained.expect("sustained");
        assert_eq!(sustained.level, SustainedLevel::Single);
        assert!(report.dv.expect("dv").signal);
    }

    #[test]
    fn short_history_is_insufficient_not_an_error() {
        let report = run_indicators(&series("TINY", &[1.0, 2.0], &[5.0, 5.0]), &small_config());
        assert!(report.is_insufficient());
        assert!(report.signals.is_empty());
    }

    #[test]
    fn summary_buckets_signals_and_orders_leaderboards() {
        let calm_closes: Vec<f64> = (0..31).map(|i| 50.0 + (i % 4) as f64).collect();
        let calm = series("CALM", &calm_closes, &vec![1_000.0; 31]);
        let tiny = series("TINY", &[1.0], &[1.0]);
        let universe = vec![breakout_symbol(), calm, tiny];

        let reports = run_all(&universe, &small_config());
        let summary = summarize(reports.values());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.insufficient, 1);
        assert_eq!(summary.with_signals, 1);
        assert_eq!(
            summary.signals["pmarp:bullish_breakout"],
            vec![Symbol::parse("JUMP").expect("symbol")]
        );
        assert_eq!(summary.top_pmarp[0].symbol.as_str(), "JUMP");
        assert_eq!(summary.low_pmarp[0].symbol.as_str(), "CALM");
        assert_eq!(summary.top_rvol[0].symbol.as_str(), "JUMP");
    }

    #[test]
    fn sustained_scan_orders_by_level_then_latest() {
        let base = vec![
            1_000.0, 1_010.0, 990.0, 1_005.0, 995.0, 1_000.0, 1_020.0, 980.0, 1_000.0, 1_000.0,
        ];
        let closes = vec![10.0; 15];

        let mut three_days = base.clone();
        three_days.extend([1_000.0, 1_000.0, 90_000.0, 95_000.0, 99_000.0]);
        let mut one_day = base.clone();
        one_day.extend([1_000.0, 1_000.0, 1_000.0, 1_000.0, 500_000.0]);
        let mut quiet = base;
        quiet.extend([1_000.0; 5]);

        let universe = vec![
            series("ONE", &closes, &one_day),
            series("THREE", &closes, &three_days),
            series("QUIET", &closes, &quiet),
        ];
        let hits = scan_sustained(&universe, &small_config());
        let symbols: Vec<&str> = hits.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["THREE", "ONE"]);
        assert_eq!(hits[0].run.level, SustainedLevel::Sustained3d);
    }
}
