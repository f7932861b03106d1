use serde::{Deserialize, Serialize};

use crate::{Symbol, TradeDate, ValidationError};

/// Daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBar")]
pub struct Bar {
    pub date: TradeDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        date: TradeDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        validate_non_negative("volume", volume)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Traded value of the bar, `close × volume`.
    pub fn dollar_volume(&self) -> f64 {
        self.close * self.volume
    }
}

#[derive(Deserialize)]
struct RawBar {
    date: TradeDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl TryFrom<RawBar> for Bar {
    type Error = ValidationError;

    fn try_from(raw: RawBar) -> Result<Self, Self::Error> {
        Self::new(raw.date, raw.open, raw.high, raw.low, raw.close, raw.volume)
    }
}

/// Ascending, duplicate-free daily bars for one symbol. Gaps are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct SymbolSeries {
    symbol: Symbol,
    bars: Vec<Bar>,
}

impl SymbolSeries {
    pub fn new(symbol: Symbol, bars: Vec<Bar>) -> Result<Self, ValidationError> {
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].date == pair[0].date {
                return Err(ValidationError::DuplicateDate {
                    symbol: symbol.to_string(),
                    date: pair[1].date.to_string(),
                });
            }
            if pair[1].date < pair[0].date {
                return Err(ValidationError::UnorderedDates {
                    symbol: symbol.to_string(),
                    index: index + 1,
                });
            }
        }

        Ok(Self { symbol, bars })
    }

    /// Build a series from bars in any order, sorting by date first.
    /// Duplicate dates are still rejected.
    pub fn from_unsorted(symbol: Symbol, mut bars: Vec<Bar>) -> Result<Self, ValidationError> {
        bars.sort_by_key(|bar| bar.date);
        Self::new(symbol, bars)
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.volume).collect()
    }

    pub fn dollar_volumes(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::dollar_volume).collect()
    }
}

#[derive(Deserialize)]
struct RawSeries {
    symbol: Symbol,
    bars: Vec<Bar>,
}

impl TryFrom<RawSeries> for SymbolSeries {
    type Error = ValidationError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.bars)
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
