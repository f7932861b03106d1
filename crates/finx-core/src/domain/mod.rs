//! # Domain Models
//!
//! Canonical inputs consumed by the finx scoring components.
//!
//! ## Overview
//!
//! All models validate their invariants at construction time, including when
//! they are deserialized, so a scorer never sees a malformed series:
//!
//! - **Ordered**: a [`SymbolSeries`] is ascending by date with no duplicates
//! - **Bounded**: a [`Bar`] has finite, non-negative prices with
//!   `low <= open, close <= high`
//! - **Normalized**: [`Symbol`] and [`Entity`] identifiers are uppercase
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Bar`] | Daily OHLCV bar |
//! | [`SymbolSeries`] | Ordered bars for one symbol |
//! | [`Symbol`] | Validated ticker |
//! | [`Entity`] | Attention-tracked identifier |
//! | [`TradeDate`] | Calendar date (`YYYY-MM-DD`) |
//! | [`WeekKey`] | Monday-aligned week |
//!
//! ```rust
//! use finx_core::{Bar, Symbol, SymbolSeries, TradeDate, ValidationError};
//!
//! let date = TradeDate::parse("2024-01-02")?;
//! let bar = Bar::new(date, 100.0, 105.0, 95.0, 102.0, 1_000.0)?;
//! let series = SymbolSeries::new(Symbol::parse("aapl")?, vec![bar])?;
//! assert_eq!(series.symbol().as_str(), "AAPL");
//! # Ok::<(), ValidationError>(())
//! ```

mod date;
mod ids;
mod models;

pub use date::{TradeDate, WeekKey};
pub use ids::{Entity, Symbol};
pub use models::{Bar, SymbolSeries};
