use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a daily bar or a mention observation (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Shift by a signed number of calendar days, saturating at the
    /// representable range.
    pub fn add_days(self, days: i64) -> Self {
        let shifted = if days >= 0 {
            self.0.checked_add(Duration::days(days))
        } else {
            self.0.checked_sub(Duration::days(days.saturating_neg()))
        };
        match shifted {
            Some(date) => Self(date),
            None if days >= 0 => Self(Date::MAX),
            None => Self(Date::MIN),
        }
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Monday-aligned calendar week used to key attention periods.
///
/// The key is the Monday itself, so persisted history written as
/// `2024-03-04` and a lookup for any date in 2024-03-04..=2024-03-10 agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "TradeDate", into = "TradeDate")]
pub struct WeekKey(TradeDate);

impl WeekKey {
    /// Week containing `date`.
    pub fn containing(date: TradeDate) -> Self {
        let back = i64::from(date.0.weekday().number_days_from_monday());
        Self(date.add_days(-back))
    }

    /// Parse a week key; the date must already be a Monday.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::try_from(TradeDate::parse(input)?)
    }

    pub const fn start(self) -> TradeDate {
        self.0
    }

    pub fn previous(self) -> Self {
        Self(self.0.add_days(-7))
    }

    pub fn next(self) -> Self {
        Self(self.0.add_days(7))
    }
}

impl TryFrom<TradeDate> for WeekKey {
    type Error = ValidationError;

    fn try_from(value: TradeDate) -> Result<Self, Self::Error> {
        let key = Self::containing(value);
        if key.0 != value {
            return Err(ValidationError::parameter(
                "week_start",
                format!("{value} is not a Monday"),
            ));
        }
        Ok(key)
    }
}

impl From<WeekKey> for TradeDate {
    fn from(value: WeekKey) -> Self {
        value.0
    }
}

impl Display for WeekKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
