use std::collections::BTreeMap;

use finx_core::{Entity, TradeDate, ValidationError, WeekKey};
use serde::{Deserialize, Serialize};

/// Where an attention count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Social-post mention counts.
    Mention,
    /// News article counts.
    Article,
    /// Anchor-normalized search interest, keyed by keyword.
    Search,
}

/// `keyword -> entities` used to lift search interest onto entities.
pub type KeywordMap = BTreeMap<Entity, Vec<Entity>>;

/// One source's total for one entity over one Monday-aligned week.
///
/// For [`Source::Search`] the `entity` field names the keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAggregate")]
pub struct PeriodAggregate {
    pub entity: Entity,
    pub source: Source,
    pub period: WeekKey,
    pub value: f64,
}

impl PeriodAggregate {
    pub fn new(
        entity: Entity,
        source: Source,
        period: WeekKey,
        value: f64,
    ) -> Result<Self, ValidationError> {
        check_count(value)?;
        Ok(Self {
            entity,
            source,
            period,
            value,
        })
    }
}

#[derive(Deserialize)]
struct RawAggregate {
    entity: Entity,
    source: Source,
    period: WeekKey,
    value: f64,
}

impl TryFrom<RawAggregate> for PeriodAggregate {
    type Error = ValidationError;

    fn try_from(raw: RawAggregate) -> Result<Self, Self::Error> {
        Self::new(raw.entity, raw.source, raw.period, raw.value)
    }
}

/// A single day's count before weekly roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObservation")]
pub struct DailyObservation {
    pub entity: Entity,
    pub source: Source,
    pub date: TradeDate,
    pub value: f64,
}

impl DailyObservation {
    pub fn new(
        entity: Entity,
        source: Source,
        date: TradeDate,
        value: f64,
    ) -> Result<Self, ValidationError> {
        check_count(value)?;
        Ok(Self {
            entity,
            source,
            date,
            value,
        })
    }
}

#[derive(Deserialize)]
struct RawObservation {
    entity: Entity,
    source: Source,
    date: TradeDate,
    value: f64,
}

impl TryFrom<RawObservation> for DailyObservation {
    type Error = ValidationError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        Self::new(raw.entity, raw.source, raw.date, raw.value)
    }
}

fn check_count(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "value" });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field: "value" });
    }
    Ok(())
}

/// Ranked attention of one entity in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionRecord {
    pub entity: Entity,
    pub mention_z: f64,
    pub article_z: f64,
    pub search_z: f64,
    pub composite: f64,
    /// 1-based; 1 is the most attention.
    pub rank: u32,
    pub period_key: WeekKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankChange {
    pub entity: Entity,
    pub rank: u32,
    pub previous_rank: Option<u32>,
    /// `previous_rank - rank`; positive means the entity moved up. `None`
    /// when it was not ranked in the previous period.
    pub change: Option<i64>,
}
