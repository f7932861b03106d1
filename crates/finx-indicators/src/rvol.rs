//! Relative volume: how many population standard deviations today's volume
//! sits above the trailing mean, plus detection of multi-day runs.

use finx_core::stats::{mean, population_std};
use finx_core::{ValidationError, DEGENERATE_STD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RvolConfig {
    pub lookback: usize,
    /// A bar belongs to a sustained run when its RVOL is strictly above this.
    pub sustained_threshold: f64,
}

impl Default for RvolConfig {
    fn default() -> Self {
        Self {
            lookback: 120,
            sustained_threshold: 2.0,
        }
    }
}

impl RvolConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lookback == 0 {
            return Err(ValidationError::parameter("rvol.lookback", "must be >= 1"));
        }
        if !self.sustained_threshold.is_finite() {
            return Err(ValidationError::parameter(
                "rvol.sustained_threshold",
                "must be finite",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RvolSignal {
    ExtremeVolume,
    HighVolume,
    LowVolume,
    Normal,
}

impl RvolSignal {
    pub fn classify(rvol: f64) -> Self {
        if rvol >= 4.0 {
            Self::ExtremeVolume
        } else if rvol >= 2.0 {
            Self::HighVolume
        } else if rvol <= -2.0 {
            Self::LowVolume
        } else {
            Self::Normal
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExtremeVolume => "extreme_volume",
            Self::HighVolume => "high_volume",
            Self::LowVolume => "low_volume",
            Self::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RvolAnalysis {
    pub current: f64,
    pub average_volume: f64,
    pub current_volume: f64,
    pub signal: RvolSignal,
}

/// Number of consecutive recent days above the threshold, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SustainedLevel {
    // declaration order is strongest first so sorting ascending puts 5d on top
    #[serde(rename = "sustained_5d")]
    Sustained5d,
    #[serde(rename = "sustained_3d")]
    Sustained3d,
    Single,
    None,
}

impl SustainedLevel {
    pub fn from_days(days: usize) -> Self {
        match days {
            0 => Self::None,
            1..=2 => Self::Single,
            3..=4 => Self::Sustained3d,
            _ => Self::Sustained5d,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sustained5d => "sustained_5d",
            Self::Sustained3d => "sustained_3d",
            Self::Single => "single",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainedRun {
    pub level: SustainedLevel,
    pub consecutive_days: usize,
    /// RVOL of each day in the run, most recent first.
    pub recent_values: Vec<f64>,
    pub latest_rvol: f64,
}

impl SustainedRun {
    fn empty() -> Self {
        Self {
            level: SustainedLevel::None,
            consecutive_days: 0,
            recent_values: Vec::new(),
            latest_rvol: 0.0,
        }
    }
}

fn score(history: &[f64], current: f64) -> f64 {
    match (mean(history), population_std(history)) {
        (Some(avg), Some(std)) if std >= DEGENERATE_STD => (current - avg) / std,
        _ => 0.0,
    }
}

/// RVOL of the last bar against the `lookback` bars before it.
pub fn rvol_latest(volumes: &[f64], lookback: usize) -> Option<f64> {
    if lookback == 0 || volumes.len() < lookback + 1 {
        return None;
    }
    let (history, current) = volumes.split_at(volumes.len() - 1);
    Some(score(&history[history.len() - lookback..], current[0]))
}

/// RVOL for every bar with a full trailing window; earlier bars are `None`.
pub fn rvol_series(volumes: &[f64], lookback: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; volumes.len()];
    if lookback == 0 {
        return out;
    }
    for i in lookback..volumes.len() {
        out[i] = Some(score(&volumes[i - lookback..i], volumes[i]));
    }
    out
}

pub fn analyze_rvol(volumes: &[f64], config: &RvolConfig) -> Option<RvolAnalysis> {
    let current = rvol_latest(volumes, config.lookback)?;
    let n = volumes.len();
    let average_volume = mean(&volumes[n - 1 - config.lookback..n - 1])?;
    Some(RvolAnalysis {
        current,
        average_volume,
        current_volume: volumes[n - 1],
        signal: RvolSignal::classify(current),
    })
}

/// Walk back from the newest defined value, counting days strictly above
/// `threshold` until the first one that is not.
pub fn sustained_run(rvol: &[Option<f64>], threshold: f64) -> SustainedRun {
    let valid: Vec<f64> = rvol.iter().flatten().copied().collect();
    let Some(&latest_rvol) = valid.last() else {
        return SustainedRun::empty();
    };

    let recent_values: Vec<f64> = valid
        .iter()
        .rev()
        .take_while(|value| **value > threshold)
        .copied()
        .collect();
    let consecutive_days = recent_values.len();

    SustainedRun {
        level: SustainedLevel::from_days(consecutive_days),
        consecutive_days,
        recent_values,
        latest_rvol,
    }
}

/// Convenience over [`rvol_series`] + [`sustained_run`]; `None` when the
/// series cannot produce a single RVOL value.
pub fn analyze_sustained(volumes: &[f64], config: &RvolConfig) -> Option<SustainedRun> {
    if config.lookback == 0 || volumes.len() < config.lookback + 1 {
        return None;
    }
    let series = rvol_series(volumes, config.lookback);
    Some(sustained_run(&series, config.sustained_threshold))
}
