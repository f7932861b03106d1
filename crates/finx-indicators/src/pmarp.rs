//! Price / moving-average ratio percentile.
//!
//! `PMARP[i]` is the share of the previous `lookback` close/EMA ratios that
//! are `<=` the ratio at `i`, in percent. A reading of 99 means price is
//! further above its EMA than on almost every day of the window.

use std::cmp::Ordering;

use finx_core::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmarpConfig {
    pub ema_period: usize,
    pub lookback: usize,
    /// Upward cross of this level is a breakout.
    pub breakout_threshold: f64,
    /// Downward cross of this level is a capitulation.
    pub breakdown_threshold: f64,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for PmarpConfig {
    fn default() -> Self {
        Self {
            ema_period: 20,
            lookback: 150,
            breakout_threshold: 98.0,
            breakdown_threshold: 2.0,
            overbought: 95.0,
            oversold: 5.0,
        }
    }
}

impl PmarpConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ema_period == 0 {
            return Err(ValidationError::parameter("pmarp.ema_period", "must be >= 1"));
        }
        if self.lookback == 0 {
            return Err(ValidationError::parameter("pmarp.lookback", "must be >= 1"));
        }
        for (name, value) in [
            ("pmarp.breakout_threshold", self.breakout_threshold),
            ("pmarp.breakdown_threshold", self.breakdown_threshold),
            ("pmarp.overbought", self.overbought),
            ("pmarp.oversold", self.oversold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::parameter(name, "must be within 0..=100"));
            }
        }
        Ok(())
    }

    /// Bars needed before the first value is defined.
    pub fn min_history(&self) -> usize {
        self.lookback + self.ema_period
    }
}

/// Regime of the latest PMARP reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PmarpSignal {
    BullishBreakout,
    OversoldBounce,
    Overbought,
    Oversold,
    Neutral,
}

impl PmarpSignal {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BullishBreakout => "bullish_breakout",
            Self::OversoldBounce => "oversold_bounce",
            Self::Overbought => "overbought",
            Self::Oversold => "oversold",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmarpAnalysis {
    pub current: f64,
    pub previous: f64,
    pub signal: PmarpSignal,
    pub crossed_above_breakout: bool,
    pub crossed_below_breakdown: bool,
}

/// Recursive EMA with `alpha = 2 / (period + 1)`, seeded with the first value.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            Some(p) => alpha * value + (1.0 - alpha) * p,
            None => value,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// PMARP for every bar; `None` where the window is not yet full, and for
/// every bar when the series is shorter than `lookback + ema_period`.
pub fn pmarp_series(closes: &[f64], config: &PmarpConfig) -> Vec<Option<f64>> {
    let lookback = config.lookback;
    let mut out = vec![None; closes.len()];
    if lookback == 0 || config.ema_period == 0 || closes.len() < config.min_history() {
        return out;
    }

    let ratios: Vec<f64> = closes
        .iter()
        .zip(ema(closes, config.ema_period))
        .map(|(close, avg)| if avg > 0.0 { close / avg } else { 1.0 })
        .collect();

    let mut window = SortedWindow::with_values(&ratios[..lookback]);
    for i in lookback..ratios.len() {
        let current = ratios[i];
        out[i] = Some(100.0 * window.count_at_most(current) as f64 / lookback as f64);
        window.remove(ratios[i - lookback]);
        window.insert(current);
    }
    out
}

/// `prev < threshold <= curr`
pub fn crossed_above(prev: f64, curr: f64, threshold: f64) -> bool {
    prev < threshold && curr >= threshold
}

/// `prev > threshold >= curr`
pub fn crossed_below(prev: f64, curr: f64, threshold: f64) -> bool {
    prev > threshold && curr <= threshold
}

/// Classify the latest bar. `None` when fewer than two PMARP values exist.
pub fn analyze_pmarp(closes: &[f64], config: &PmarpConfig) -> Option<PmarpAnalysis> {
    let valid: Vec<f64> = pmarp_series(closes, config).into_iter().flatten().collect();
    let [.., previous, current] = valid.as_slice() else {
        return None;
    };
    let (previous, current) = (*previous, *current);

    let crossed_above_breakout = crossed_above(previous, current, config.breakout_threshold);
    let crossed_below_breakdown = crossed_below(previous, current, config.breakdown_threshold);

    let signal = if crossed_above_breakout {
        PmarpSignal::BullishBreakout
    } else if crossed_below_breakdown {
        PmarpSignal::OversoldBounce
    } else if current >= config.overbought {
        PmarpSignal::Overbought
    } else if current <= config.oversold {
        PmarpSignal::Oversold
    } else {
        PmarpSignal::Neutral
    };

    Some(PmarpAnalysis {
        current,
        previous,
        signal,
        crossed_above_breakout,
        crossed_below_breakdown,
    })
}

/// Sorted multiset over the trailing ratios; O(log L) rank queries.
struct SortedWindow {
    values: Vec<f64>,
}

impl SortedWindow {
    fn with_values(values: &[f64]) -> Self {
        let mut values = values.to_vec();
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    fn count_at_most(&self, value: f64) -> usize {
        self.values
            .partition_point(|probe| probe.total_cmp(&value) != Ordering::Greater)
    }

    fn insert(&mut self, value: f64) {
        let at = self
            .values
            .partition_point(|probe| probe.total_cmp(&value) == Ordering::Less);
        self.values.insert(at, value);
    }

    fn remove(&mut self, value: f64) {
        if let Ok(at) = self.values.binary_search_by(|probe| probe.total_cmp(&value)) {
            self.values.remove(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_pmarp(closes: &[f64], config: &PmarpConfig) -> Vec<Option<f64>> {
        let mut out = vec![None; closes.len()];
        if closes.len() < config.min_history() {
            return out;
        }
        let ratios: Vec<f64> = closes
            .iter()
            .zip(ema(closes, config.ema_period))
            .map(|(c, e)| c / e)
            .collect();
        for i in config.lookback..ratios.len() {
            let count = ratios[i - config.lookback..i]
                .iter()
                .filter(|r| **r <= ratios[i])
                .count();
            out[i] = Some(count as f64 / config.lookback as f64 * 100.0);
        }
        out
    }

    fn wave(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + 10.0 * (i as f64 * 0.21).sin() + (i % 7) as f64)
            .collect()
    }

    #[test]
    fn ema_seeds_with_first_value() {
        let out = ema(&[10.0, 20.0], 3);
        assert_eq!(out[0], 10.0);
        assert!((out[1] - 15.0).abs() < 1e-12);
    }

    #[test]
    fn undefined_below_min_history() {
        let config = PmarpConfig::default();
        let closes = wave(config.min_history() - 1);
        assert!(pmarp_series(&closes, &config).iter().all(Option::is_none));
        assert!(analyze_pmarp(&closes, &config).is_none());
    }

    #[test]
    fn sliding_window_matches_naive_count() {
        let config = PmarpConfig {
            ema_period: 5,
            lookback: 30,
            ..PmarpConfig::default()
        };
        let closes = wave(200);
        let fast = pmarp_series(&closes, &config);
        let slow = naive_pmarp(&closes, &config);
        assert_eq!(fast.len(), slow.len());
        for (a, b) in fast.iter().zip(&slow) {
            match (a, b) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                (None, None) => {}
                other => panic!("mismatch: {other:?}"),
            }
        }
        assert!(fast[..30].iter().all(Option::is_none));
        assert!(fast[30..].iter().all(|v| v.is_some_and(|v| (0.0..=100.0).contains(&v))));
    }

    #[test]
    fn ties_count_as_at_most() {
        // Flat prices: every ratio is exactly 1.0, so all L values tie.
        let config = PmarpConfig {
            ema_period: 3,
            lookback: 10,
            ..PmarpConfig::default()
        };
        let closes = vec![50.0; 20];
        let series = pmarp_series(&closes, &config);
        assert_eq!(series[19], Some(100.0));
    }

    #[test]
    fn new_high_after_flat_window_is_breakout() {
        let config = PmarpConfig {
            ema_period: 3,
            lookback: 10,
            ..PmarpConfig::default()
        };
        // Gently falling prices keep each ratio below the trailing window;
        // a jump on the final bar pushes it to the top.
        let mut closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64 * 0.5).collect();
        closes.push(120.0);
        let analysis = analyze_pmarp(&closes, &config).expect("analysis");
        assert_eq!(analysis.current, 100.0);
        assert!(analysis.previous < 98.0);
        assert!(analysis.crossed_above_breakout);
        assert_eq!(analysis.signal, PmarpSignal::BullishBreakout);
    }

    fn short_config() -> PmarpConfig {
        PmarpConfig {
            ema_period: 3,
            lookback: 10,
            ..PmarpConfig::default()
        }
    }

    fn compounding(len: usize, growth: f64) -> Vec<f64> {
        (0..len).map(|i| 100.0 * growth.powi(i as i32)).collect()
    }

    #[test]
    fn steady_compounding_rise_is_overbought_without_a_cross() {
        // Price pulls further above its EMA every bar, so each ratio tops its window.
        let analysis = analyze_pmarp(&compounding(30, 1.01), &short_config()).expect("analysis");
        assert_eq!(analysis.previous, 100.0);
        assert_eq!(analysis.current, 100.0);
        assert!(!analysis.crossed_above_breakout);
        assert_eq!(analysis.signal, PmarpSignal::Overbought);
    }

    #[test]
    fn steady_compounding_fall_is_oversold_without_a_cross() {
        let analysis = analyze_pmarp(&compounding(30, 0.99), &short_config()).expect("analysis");
        assert_eq!(analysis.previous, 0.0);
        assert_eq!(analysis.current, 0.0);
        assert!(!analysis.crossed_below_breakdown);
        assert_eq!(analysis.signal, PmarpSignal::Oversold);
    }

    #[test]
    fn collapse_from_the_top_is_a_bounce_setup_not_plain_oversold() {
        let mut closes = compounding(30, 1.01);
        closes.push(closes[29] * 0.5);

        let analysis = analyze_pmarp(&closes, &short_config()).expect("analysis");

        assert_eq!(analysis.previous, 100.0);
        assert_eq!(analysis.current, 0.0);
        assert!(analysis.current <= short_config().oversold);
        assert!(analysis.crossed_below_breakdown);
        assert_eq!(analysis.signal, PmarpSignal::OversoldBounce);
    }

    #[test]
    fn breakout_cross_wins_over_overbought_level() {
        let mut closes = compounding(30, 0.99);
        closes.push(150.0);

        let analysis = analyze_pmarp(&closes, &short_config()).expect("analysis");

        assert_eq!(analysis.current, 100.0);
        assert!(analysis.current >= short_config().overbought);
        assert_eq!(analysis.signal, PmarpSignal::BullishBreakout);
    }

    #[test]
    fn mid_window_reading_is_neutral() {
        // Alternating 100/130 settles the EMA near 110 and 120, giving five
        // ratios near 0.91 and five near 1.08; a close of 110 lands between.
        let mut closes: Vec<f64> = (0..39)
            .map(|i| if i % 2 == 0 { 100.0 } else { 130.0 })
            .collect();
        closes.push(110.0);

        let analysis = analyze_pmarp(&closes, &short_config()).expect("analysis");

        assert_eq!(analysis.current, 50.0);
        assert!(!analysis.crossed_above_breakout && !analysis.crossed_below_breakdown);
        assert_eq!(analysis.signal, PmarpSignal::Neutral);
    }

    #[test]
    fn crossover_rules_are_strict_on_the_prior_side() {
        assert!(crossed_above(97.9, 98.0, 98.0));
        assert!(!crossed_above(98.0, 99.0, 98.0));
        assert!(crossed_below(2.1, 2.0, 2.0));
        assert!(!crossed_below(2.0, 1.0, 2.0));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let config = PmarpConfig {
            overbought: 120.0,
            ..PmarpConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(PmarpConfig::default().validate().is_ok());
    }
}
