//! Fixtures shared by the behavior tests.

use finx_core::{Bar, Entity, Symbol, SymbolSeries, TradeDate, WeekKey};

pub use finx_attention::{PeriodAggregate, Source};

pub const EPSILON: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Flat bars (open = high = low = close) starting 2024-01-01.
pub fn series_from(symbol: &str, closes: &[f64], volumes: &[f64]) -> SymbolSeries {
    assert_eq!(closes.len(), volumes.len(), "fixture lengths differ");
    let start = TradeDate::parse("2024-01-01").expect("valid date");
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (close, volume))| {
            Bar::new(start.add_days(i as i64), *close, *close, *close, *close, *volume)
                .expect("valid bar")
        })
        .collect();
    SymbolSeries::new(Symbol::parse(symbol).expect("valid symbol"), bars).expect("valid series")
}

pub fn closes_only(symbol: &str, closes: &[f64]) -> SymbolSeries {
    series_from(symbol, closes, &vec![1_000.0; closes.len()])
}

/// `100 * (1 + daily)^i` with a small deterministic wobble.
pub fn trending(len: usize, daily: f64) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 * (1.0 + daily).powi(i as i32) * (1.0 + 0.005 * (i as f64 * 0.7).sin()))
        .collect()
}

pub fn week(monday: &str) -> WeekKey {
    WeekKey::parse(monday).expect("monday")
}

pub fn entity(name: &str) -> Entity {
    Entity::parse(name).expect("entity")
}

pub fn aggregate(name: &str, source: Source, monday: &str, value: f64) -> PeriodAggregate {
    PeriodAggregate::new(entity(name), source, week(monday), value).expect("aggregate")
}
