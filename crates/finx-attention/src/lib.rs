//! # finx Attention
//!
//! Scores how unusual the attention on an entity is this week compared with
//! its own recent past, across three sources:
//!
//! | Source | Input | Default weight |
//! |--------|-------|----------------|
//! | [`Source::Mention`] | Social-post mention counts | 0.35 |
//! | [`Source::Article`] | News article counts | 0.35 |
//! | [`Source::Search`] | Anchor-normalized search interest per keyword | 0.30 |
//!
//! Inputs are weekly [`PeriodAggregate`]s keyed by Monday
//! ([`WeekKey`](finx_core::WeekKey)); [`aggregate_weekly`] builds them from
//! daily counts. History is plain data, nothing is cached between calls.
//!
//! ```rust
//! use finx_attention::{score_period, AttentionConfig, AttentionHistory, KeywordMap};
//! use finx_attention::{PeriodAggregate, Source};
//! use finx_core::{Entity, WeekKey};
//!
//! let week = WeekKey::parse("2024-06-03").expect("monday");
//! let nvda = Entity::parse("NVDA").expect("entity");
//! let aggregate = PeriodAggregate::new(nvda, Source::Mention, week, 12.0).expect("aggregate");
//!
//! let history = AttentionHistory::from_aggregates([&aggregate]);
//! let ranked = score_period(&history, &KeywordMap::new(), week, &AttentionConfig::default());
//! assert_eq!(ranked[0].rank, 1);
//! assert_eq!(ranked[0].composite, 0.0, "no baseline yet");
//! ```

pub mod config;
pub mod extract;
pub mod history;
pub mod model;
pub mod scoring;

pub use config::{AttentionConfig, SourceWeights};
pub use extract::{extract_hot_keywords, extract_tickers};
pub use history::{aggregate_weekly, anchor_ratio, AttentionHistory};
pub use model::{
    AttentionRecord, DailyObservation, KeywordMap, PeriodAggregate, RankChange, Source,
};
pub use scoring::{new_discoveries, rank_changes, score_all_periods, score_period};
