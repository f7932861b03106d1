//! Pieces shared by both ranking methods: the run configuration and the
//! composite-to-percentile step.

use finx_core::stats::percentile_ranks;
use finx_core::ValidationError;
use serde::{Deserialize, Serialize};

/// Bars a symbol needs before either method will score it.
pub const MIN_HISTORY: usize = 70;

/// Method B reads `close[n - 64]`.
const MIN_ADDRESSABLE_HISTORY: usize = 65;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub min_history: usize,
    /// Cross-sectional z-scores are clipped to `[-z_clip, z_clip]`.
    pub z_clip: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            min_history: MIN_HISTORY,
            z_clip: 3.0,
        }
    }
}

impl MomentumConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_history < MIN_ADDRESSABLE_HISTORY {
            return Err(ValidationError::parameter(
                "momentum.min_history",
                format!("must be >= {MIN_ADDRESSABLE_HISTORY}"),
            ));
        }
        if !self.z_clip.is_finite() || self.z_clip <= 0.0 {
            return Err(ValidationError::parameter(
                "momentum.z_clip",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

/// Assign 0..=99 ranks from `composite` and return the records strongest
/// first. Equal composites keep their input order.
pub(crate) fn rank_and_order<T>(
    mut records: Vec<T>,
    composite: impl Fn(&T) -> f64,
    mut set_rank: impl FnMut(&mut T, u8),
) -> Vec<T> {
    let composites: Vec<f64> = records.iter().map(&composite).collect();
    for (record, rank) in records.iter_mut().zip(percentile_ranks(&composites)) {
        set_rank(record, rank);
    }
    records.sort_by(|a, b| composite(b).total_cmp(&composite(a)));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_composite_and_order_is_descending() {
        let ranked = rank_and_order(
            vec![("a", 0.1, 0u8), ("b", -2.0, 0), ("c", 0.1, 0), ("d", 5.0, 0)],
            |r| r.1,
            |r, rank| r.2 = rank,
        );
        let names: Vec<&str> = ranked.iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["d", "a", "c", "b"]);
        // average ranks 4, 2.5, 2.5, 1 over four entries
        let ranks: Vec<u8> = ranked.iter().map(|r| r.2).collect();
        assert_eq!(ranks, vec![99, 62, 62, 25]);
    }

    #[test]
    fn rejects_history_too_short_to_index() {
        let config = MomentumConfig {
            min_history: 30,
            ..MomentumConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(MomentumConfig::default().validate().is_ok());
    }
}
