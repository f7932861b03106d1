//! Composite attention ranking.
//!
//! Each source is scored as a z-score of the period's value against that
//! entity's own recent history (population deviation). Search interest is
//! recorded per keyword; an entity takes the highest z-score among the
//! keywords mapped to it that have a value this period.
//!
//! `composite = w_mention·z_mention + w_article·z_article + w_search·z_search`

use std::collections::{BTreeMap, BTreeSet};

use finx_core::stats::baseline_zscore;
use finx_core::{Entity, WeekKey};
use tracing::{debug, info};

use crate::config::AttentionConfig;
use crate::history::AttentionHistory;
use crate::model::{AttentionRecord, KeywordMap, RankChange, Source};

fn source_zscore(
    history: &AttentionHistory,
    entity: &Entity,
    source: Source,
    period: WeekKey,
    config: &AttentionConfig,
) -> f64 {
    let current = history.current(entity, source, period).unwrap_or(0.0);
    let baseline = history.baseline(entity, source, period, config.baseline_days);
    baseline_zscore(&baseline, current)
}

/// Highest keyword z-score per entity, over keywords present in `period`.
fn search_zscores(
    history: &AttentionHistory,
    keywords: &KeywordMap,
    period: WeekKey,
    config: &AttentionConfig,
) -> BTreeMap<Entity, f64> {
    let mut by_entity: BTreeMap<Entity, f64> = BTreeMap::new();
    for (keyword, entities) in keywords {
        if history.current(keyword, Source::Search, period).is_none() {
            continue;
        }
        let z = source_zscore(history, keyword, Source::Search, period, config);
        for entity in entities {
            by_entity
                .entry(entity.clone())
                .and_modify(|best| *best = best.max(z))
                .or_insert(z);
        }
    }
    by_entity
}

/// Rank every entity with attention in `period`, most attention first.
///
/// Ties keep entity order. Ranks run from 1; `top_n` truncates after
/// ranking.
pub fn score_period(
    history: &AttentionHistory,
    keywords: &KeywordMap,
    period: WeekKey,
    config: &AttentionConfig,
) -> Vec<AttentionRecord> {
    let search = search_zscores(history, keywords, period, config);

    let mut entities: BTreeSet<Entity> = history.present(Source::Mention, period);
    entities.extend(history.present(Source::Article, period));
    entities.extend(search.keys().cloned());

    let weights = &config.weights;
    let mut records: Vec<AttentionRecord> = entities
        .into_iter()
        .map(|entity| {
            let mention_z = source_zscore(history, &entity, Source::Mention, period, config);
            let article_z = source_zscore(history, &entity, Source::Article, period, config);
            let search_z = search.get(&entity).copied().unwrap_or(0.0);
            let composite = weights.weight(Source::Mention) * mention_z
                + weights.weight(Source::Article) * article_z
                + weights.weight(Source::Search) * search_z;
            AttentionRecord {
                entity,
                mention_z,
                article_z,
                search_z,
                composite,
                rank: 0,
                period_key: period,
            }
        })
        .collect();

    records.sort_by(|a, b| b.composite.total_cmp(&a.composite));
    for (index, record) in records.iter_mut().enumerate() {
        record.rank = index as u32 + 1;
    }
    let ranked = records.len();
    if let Some(top_n) = config.top_n {
        records.truncate(top_n);
    }

    info!(%period, ranked, kept = records.len(), "attention period scored");
    records
}

/// Score every period present in `history`, oldest first.
pub fn score_all_periods(
    history: &AttentionHistory,
    keywords: &KeywordMap,
    config: &AttentionConfig,
) -> Vec<AttentionRecord> {
    history
        .periods()
        .into_iter()
        .flat_map(|period| score_period(history, keywords, period, config))
        .collect()
}

/// Records of `period` whose entity is absent from every earlier period in
/// `snapshots`, most attention first.
pub fn new_discoveries(snapshots: &[AttentionRecord], period: WeekKey) -> Vec<AttentionRecord> {
    let seen: BTreeSet<&Entity> = snapshots
        .iter()
        .filter(|record| record.period_key < period)
        .map(|record| &record.entity)
        .collect();

    let mut fresh: Vec<AttentionRecord> = snapshots
        .iter()
        .filter(|record| record.period_key == period && !seen.contains(&record.entity))
        .cloned()
        .collect();
    fresh.sort_by(|a, b| b.composite.total_cmp(&a.composite));

    debug!(%period, discoveries = fresh.len(), "new discoveries");
    fresh
}

/// Movement of each currently ranked entity against the previous ranking.
pub fn rank_changes(current: &[AttentionRecord], previous: &[AttentionRecord]) -> Vec<RankChange> {
    let before: BTreeMap<&Entity, u32> = previous
        .iter()
        .map(|record| (&record.entity, record.rank))
        .collect();

    current
        .iter()
        .map(|record| {
            let previous_rank = before.get(&record.entity).copied();
            RankChange {
                entity: record.entity.clone(),
                rank: record.rank,
                previous_rank,
                change: previous_rank.map(|prev| i64::from(prev) - i64::from(record.rank)),
            }
        })
        .collect()
}
