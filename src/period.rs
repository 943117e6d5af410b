// src/period.rs
//! Calendar period arithmetic for bucketing statistics.
//!
//! Day numbering is pinned to 0 = Sunday (`Weekday::num_days_from_sunday`)
//! so that week boundaries never depend on a locale setting.

use crate::error::ValidationError;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar granularity used to bucket statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(ValidationError::InvalidPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive calendar boundaries of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRange {
    pub start_of: NaiveDate,
    pub end_of: NaiveDate,
}

impl PeriodRange {
    /// The `YYYY-MM-DD` key under which per-day payload buckets are filed.
    pub fn start_key(&self) -> String {
        self.start_of.format("%Y-%m-%d").to_string()
    }

    /// Whether `date` falls inside the range, boundaries included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_of && date <= self.end_of
    }
}

/// Returns the inclusive `start_of`/`end_of` boundaries for `period` around
/// `date`.
///
/// The naive week runs Sunday through Saturday; weekly ranges are then
/// corrected to the Monday-first business week. A Sunday anchor pulls
/// `start_of` back six days and leaves `end_of` alone; any other anchor
/// pushes both boundaries forward one day.
pub fn range_of_period(period: Period, date: NaiveDate) -> PeriodRange {
    match period {
        Period::Day => PeriodRange {
            start_of: date,
            end_of: date,
        },
        Period::Week => week_range(date),
        Period::Month => month_range(date),
        Period::Year => year_range(date),
    }
}

fn week_range(date: NaiveDate) -> PeriodRange {
    let back = u64::from(date.weekday().num_days_from_sunday());
    let naive_start = date.checked_sub_days(Days::new(back)).unwrap_or(date);
    let naive_end = naive_start.checked_add_days(Days::new(6)).unwrap_or(date);

    if date.weekday() == Weekday::Sun {
        PeriodRange {
            start_of: naive_start
                .checked_sub_days(Days::new(6))
                .unwrap_or(naive_start),
            end_of: naive_end,
        }
    } else {
        PeriodRange {
            start_of: naive_start
                .checked_add_days(Days::new(1))
                .unwrap_or(naive_start),
            end_of: naive_end.checked_add_days(Days::new(1)).unwrap_or(naive_end),
        }
    }
}

fn month_range(date: NaiveDate) -> PeriodRange {
    let start_of = date.with_day(1).unwrap_or(date);
    let end_of = start_of
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date);
    PeriodRange { start_of, end_of }
}

fn year_range(date: NaiveDate) -> PeriodRange {
    PeriodRange {
        start_of: NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        end_of: NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
    }
}

/// Parses a calendar day from either a plain date or a date-time string.
/// Post dates arrive in both shapes depending on the endpoint.
pub(crate) fn parse_day(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .or_else(|_| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date())
        })
        .ok()
}
