//! # finx Core
//!
//! Shared contracts for the finx signal-scoring crates.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Bars, series, identifiers, dates and week keys |
//! | [`stats`] | Mean/deviation, z-scores, average ranks, least squares |
//! | [`envelope`] | Output envelope with run metadata |
//! | [`error`] | Core error types |
//!
//! Scorers live in `finx-indicators` (per-symbol oscillators),
//! `finx-momentum` (cross-sectional rankings) and `finx-attention`
//! (mention/search composite). They depend on this crate only.
//!
//! ## Error Handling
//!
//! Missing history is routine in a live feed and never an error here; the
//! scorers return `None` or drop the symbol. [`ValidationError`] is reserved
//! for inputs with the wrong shape:
//!
//! ```rust
//! use finx_core::{Bar, TradeDate, ValidationError};
//!
//! let date = TradeDate::parse("2024-01-02").expect("date");
//! let err = Bar::new(date, 10.0, 9.0, 11.0, 10.0, 5.0).expect_err("high < low");
//! assert!(matches!(err, ValidationError::InvalidBarRange));
//! ```

pub mod domain;
pub mod envelope;
pub mod error;
pub mod stats;

pub use domain::{Bar, Entity, Symbol, SymbolSeries, TradeDate, WeekKey};
pub use envelope::{Envelope, EnvelopeMeta};
pub use error::ValidationError;
pub use stats::{LinearFit, DEGENERATE_STD};
