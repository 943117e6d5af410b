// src/types/summary.rs
//! Non-tree normalizer outputs: the insights summary and per-video series.

use serde::Serialize;

/// Best day/hour summary derived from the insights endpoint.
///
/// `Default` is the documented empty record returned when the payload fails
/// its preconditions — callers receive a record either way, never a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSummary {
    /// Weekday name of the best-traffic day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    /// Share of weekly views falling on that day, rounded to whole percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u32>,
    /// Best-traffic hour on a 12-hour clock, e.g. `2:00 PM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_percent: Option<u32>,
}

impl InsightsSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One point of a per-video plays series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub period: String,
    pub value: u64,
}
