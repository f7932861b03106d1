//! Closed-form statistics shared by the scorers.
//!
//! Population (`ddof = 0`) and sample (`ddof = 1`) deviations are kept as
//! separate functions; callers pick the one their statistic is defined with.

use std::cmp::Ordering;

/// Deviations below this are treated as zero spread.
pub const DEGENERATE_STD: f64 = 1e-10;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (`ddof = 0`).
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Sample standard deviation (`ddof = 1`); undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Z-score of `current` against a historical baseline using the population
/// deviation. Baselines shorter than two values or without spread score 0.
pub fn baseline_zscore(baseline: &[f64], current: f64) -> f64 {
    if baseline.len() < 2 {
        return 0.0;
    }
    match (mean(baseline), population_std(baseline)) {
        (Some(m), Some(std)) if std >= DEGENERATE_STD => (current - m) / std,
        _ => 0.0,
    }
}

/// Cross-sectional z-scores using the sample deviation, clipped to
/// `[-clip, clip]`. Fewer than two values or zero spread yields all zeros.
pub fn cross_sectional_zscores(values: &[f64], clip: f64) -> Vec<f64> {
    let (Some(m), Some(std)) = (mean(values), sample_std(values)) else {
        return vec![0.0; values.len()];
    };
    if std <= DEGENERATE_STD {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| ((v - m) / std).clamp(-clip, clip))
        .collect()
}

/// One-based ranks where tied values share the average of the positions
/// they occupy.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len()
            && values[order[end]].total_cmp(&values[order[start]]) == Ordering::Equal
        {
            end += 1;
        }
        // positions start..end are 0-based; average of (start+1)..=end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = shared;
        }
        start = end;
    }
    ranks
}

/// Dense 0..=99 percentile rank of every value within the set.
///
/// A lone value sits at the midpoint, 50.
pub fn percentile_ranks(values: &[f64]) -> Vec<u8> {
    match values.len() {
        0 => Vec::new(),
        1 => vec![50],
        n => average_ranks(values)
            .into_iter()
            .map(|rank| {
                let pct = (rank / n as f64 * 100.0).floor();
                pct.clamp(0.0, 99.0) as u8
            })
            .collect(),
    }
}

/// Ordinary least-squares fit of `y` against the index `0..y.len()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Fits `y[i] = intercept + slope * i`. Needs at least two points.
///
/// A flat `y` has no explained variance and reports `r_squared = 0`.
pub fn fit_against_index(y: &[f64]) -> Option<LinearFit> {
    if y.len() < 2 {
        return None;
    }
    let n = y.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = mean(y)?;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (i, value) in y.iter().enumerate() {
        let dx = i as f64 - x_mean;
        let dy = value - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let slope = sxy / sxx;
    let r_squared = if syy == 0.0 {
        0.0
    } else {
        let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
        r * r
    };

    Some(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
        r_squared,
    })
}
