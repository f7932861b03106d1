//! Per-symbol fan-out over a bounded rayon pool.
//!
//! Each worker reads one series and produces at most one value; the only
//! synchronization is the final collect into an ordered map, which also acts
//! as the barrier before any cross-sectional step.

use std::collections::BTreeMap;

use finx_core::{Symbol, SymbolSeries, ValidationError};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads; `1` runs inline on the caller's thread.
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

impl BatchConfig {
    pub const fn sequential() -> Self {
        Self { workers: 1 }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.workers == 0 {
            return Err(ValidationError::parameter("batch.workers", "must be >= 1"));
        }
        Ok(())
    }
}

/// Apply `compute` to every series and join the results by symbol.
///
/// Symbols for which `compute` returns `None` are absent from the map. A
/// symbol listed twice keeps the last result produced for it.
pub fn map_symbols<T, F>(
    series: &[SymbolSeries],
    config: &BatchConfig,
    compute: F,
) -> BTreeMap<Symbol, T>
where
    T: Send,
    F: Fn(&SymbolSeries) -> Option<T> + Sync + Send,
{
    let run_inline = |compute: &F| -> Vec<(Symbol, Option<T>)> {
        series
            .iter()
            .map(|s| (s.symbol().clone(), compute(s)))
            .collect()
    };

    let slots: Vec<(Symbol, Option<T>)> = if config.workers <= 1 || series.len() <= 1 {
        run_inline(&compute)
    } else {
        match ThreadPoolBuilder::new().num_threads(config.workers).build() {
            Ok(pool) => pool.install(|| {
                series
                    .par_iter()
                    .map(|s| (s.symbol().clone(), compute(s)))
                    .collect()
            }),
            Err(error) => {
                warn!(%error, "worker pool unavailable, running sequentially");
                run_inline(&compute)
            }
        }
    };

    let total = slots.len();
    let joined: BTreeMap<Symbol, T> = slots
        .into_iter()
        .filter_map(|(symbol, value)| value.map(|v| (symbol, v)))
        .collect();
    debug!(total, produced = joined.len(), workers = config.workers, "batch joined");
    joined
}
