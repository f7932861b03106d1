//! Period-indexed attention history and the roll-ups that feed it.

use std::collections::{BTreeMap, BTreeSet};

use finx_core::{Entity, WeekKey};
use tracing::debug;

use crate::model::{DailyObservation, PeriodAggregate, Source};

/// Search interest relative to a fixed anchor term, with the anchor floored
/// at 1 so a missing anchor cannot blow the ratio up.
pub fn anchor_ratio(interest: f64, anchor: f64) -> f64 {
    interest / anchor.max(1.0)
}

/// Sum daily observations into Monday-aligned weekly aggregates, ordered by
/// entity, source and period.
pub fn aggregate_weekly<'a>(
    daily: impl IntoIterator<Item = &'a DailyObservation>,
) -> Vec<PeriodAggregate> {
    let mut totals: BTreeMap<(Entity, Source, WeekKey), f64> = BTreeMap::new();
    for obs in daily {
        *totals
            .entry((obs.entity.clone(), obs.source, WeekKey::containing(obs.date)))
            .or_default() += obs.value;
    }
    totals
        .into_iter()
        .map(|((entity, source, period), value)| PeriodAggregate {
            entity,
            source,
            period,
            value,
        })
        .collect()
}

/// All aggregates, indexed by `(entity, source)` then period. Repeated
/// aggregates for the same key are summed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttentionHistory {
    series: BTreeMap<(Entity, Source), BTreeMap<WeekKey, f64>>,
}

impl AttentionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_aggregates<'a>(aggregates: impl IntoIterator<Item = &'a PeriodAggregate>) -> Self {
        let mut history = Self::new();
        for aggregate in aggregates {
            history.insert(aggregate);
        }
        debug!(series = history.series.len(), "attention history indexed");
        history
    }

    pub fn insert(&mut self, aggregate: &PeriodAggregate) {
        *self
            .series
            .entry((aggregate.entity.clone(), aggregate.source))
            .or_default()
            .entry(aggregate.period)
            .or_default() += aggregate.value;
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn current(&self, entity: &Entity, source: Source, period: WeekKey) -> Option<f64> {
        self.series
            .get(&(entity.clone(), source))
            .and_then(|by_period| by_period.get(&period))
            .copied()
    }

    /// Values for periods starting in `[period - baseline_days, period)`,
    /// oldest first.
    pub fn baseline(
        &self,
        entity: &Entity,
        source: Source,
        period: WeekKey,
        baseline_days: i64,
    ) -> Vec<f64> {
        let Some(by_period) = self.series.get(&(entity.clone(), source)) else {
            return Vec::new();
        };
        let earliest = period.start().add_days(-baseline_days);
        by_period
            .range(..period)
            .filter(|(key, _)| key.start() >= earliest)
            .map(|(_, value)| *value)
            .collect()
    }

    /// Entities (or keywords, for search) with a value in `period`.
    pub fn present(&self, source: Source, period: WeekKey) -> BTreeSet<Entity> {
        self.series
            .iter()
            .filter(|((_, s), by_period)| *s == source && by_period.contains_key(&period))
            .map(|((entity, _), _)| entity.clone())
            .collect()
    }

    /// Every period with at least one aggregate, oldest first.
    pub fn periods(&self) -> BTreeSet<WeekKey> {
        self.series
            .values()
            .flat_map(|by_period| by_period.keys().copied())
            .collect()
    }

    pub fn latest_period(&self) -> Option<WeekKey> {
        self.periods().last().copied()
    }
}
