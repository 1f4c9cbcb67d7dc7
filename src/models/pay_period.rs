//! Pay period model.
//!
//! A pay period is one calendar month, written as a `"month/year"` token
//! such as `"9/2025"`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A monthly pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::parse("9/2025").unwrap();
/// assert_eq!(period.month(), 9);
/// assert_eq!(period.year(), 2025);
/// assert!(period.contains(NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()));
/// assert_eq!(period.compact_token(), "92025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayPeriod {
    month: u32,
    year: i32,
}

impl PayPeriod {
    /// Creates a pay period, rejecting months outside 1..=12.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_input(
                "period",
                format!("month must be between 1 and 12, got {}", month),
            ));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::invalid_input(
                "period",
                format!("year {} is out of range", year),
            ));
        }
        Ok(Self { month, year })
    }

    /// Parses a `"month/year"` token.
    pub fn parse(token: &str) -> EngineResult<Self> {
        let malformed = || {
            EngineError::invalid_input(
                "period",
                format!("expected 'month/year', got '{}'", token),
            )
        };

        let (month, year) = token.trim().split_once('/').ok_or_else(malformed)?;
        let month: u32 = month.trim().parse().map_err(|_| malformed())?;
        let year: i32 = year.trim().parse().map_err(|_| malformed())?;

        Self::new(month, year)
    }

    /// Returns the 1-indexed month.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the first day of the period.
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns the last day of the period.
    pub fn end_date(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks whether a date falls in the same year and month as this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the token with the slash stripped, as used in pay slip ids.
    pub fn compact_token(&self) -> String {
        format!("{}{}", self.month, self.year)
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PayPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PayPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).map_err(serde::de::Error::custom)
    }
}
