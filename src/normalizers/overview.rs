// src/normalizers/overview.rs
//! Normalizers for the site-wide overview endpoints: flat visitor totals
//! and the best day/hour insights summary.

use crate::types::InsightsSummary;
use chrono::NaiveTime;
use indexmap::IndexMap;
use serde_json::Value;

/// Normalizes the flat site totals payload.
///
/// Returns `None` when the payload or its `stats` field is missing;
/// otherwise the totals map with every key re-keyed to camelCase.
pub fn stats(payload: Option<&Value>) -> Option<IndexMap<String, Value>> {
    let totals = payload?.get("stats")?.as_object()?;
    Some(
        totals
            .iter()
            .map(|(key, value)| (camel_case(key), value.clone()))
            .collect(),
    )
}

/// Weekday names indexed 0 = Sunday, matching the display convention.
const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Normalizes the insights payload into a best day/hour summary.
///
/// The upstream payload numbers days from 0 = Monday while display
/// numbering starts at 0 = Sunday, so the index shifts by one and wraps at
/// seven. Returns the empty summary unless `highest_day_of_week` is
/// numeric.
pub fn insights(payload: Option<&Value>) -> InsightsSummary {
    let Some(payload) = payload else {
        return InsightsSummary::default();
    };
    let Some(highest_day) = payload.get("highest_day_of_week").and_then(Value::as_f64) else {
        return InsightsSummary::default();
    };

    let day_index = ((highest_day.round() as i64) + 1).rem_euclid(7) as usize;

    InsightsSummary {
        day: Some(WEEKDAYS[day_index].to_string()),
        percent: rounded_percent(payload, "highest_day_percent"),
        hour: payload
            .get("highest_hour")
            .and_then(Value::as_u64)
            .and_then(clock_label),
        hour_percent: rounded_percent(payload, "highest_hour_percent"),
    }
}

fn rounded_percent(payload: &Value, key: &str) -> Option<u32> {
    payload
        .get(key)
        .and_then(Value::as_f64)
        .map(|percent| percent.round().max(0.0) as u32)
}

/// Locale-neutral 12-hour label for an hour of the day, e.g. `2:00 PM`.
fn clock_label(hour: u64) -> Option<String> {
    let hour = u32::try_from(hour).ok()?;
    let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
    Some(time.format("%-I:%M %p").to_string())
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if matches!(ch, '_' | '-' | ' ') {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn stats_is_none_without_a_payload() {
        assert_eq!(stats(None), None);
        assert_eq!(stats(Some(&json!({ "not_stats": {} }))), None);
    }

    #[test]
    fn stats_rekeys_totals_to_camel_case() {
        let payload = json!({
            "stats": {
                "views_today": 120,
                "visitors-yesterday": 80,
                "posts": 7,
            }
        });

        let totals = stats(Some(&payload)).expect("payload has totals");
        assert_eq!(totals.get("viewsToday"), Some(&json!(120)));
        assert_eq!(totals.get("visitorsYesterday"), Some(&json!(80)));
        assert_eq!(totals.get("posts"), Some(&json!(7)));
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn camel_case_handles_separator_runs() {
        assert_eq!(camel_case("some_key"), "someKey");
        assert_eq!(camel_case("highest_day_of_week"), "highestDayOfWeek");
        assert_eq!(camel_case("_leading"), "leading");
        assert_eq!(camel_case("plain"), "plain");
    }

    #[test]
    fn insights_is_empty_without_a_numeric_day() {
        assert!(insights(None).is_empty());
        assert!(insights(Some(&json!({}))).is_empty());
        assert!(insights(Some(&json!({ "highest_day_of_week": "monday" }))).is_empty());
    }

    #[test]
    fn insights_remaps_monday_based_days_to_sunday_based() {
        // Upstream 0 = Monday; display 0 = Sunday.
        let monday = insights(Some(&json!({ "highest_day_of_week": 0 })));
        assert_eq!(monday.day.as_deref(), Some("Monday"));

        let sunday = insights(Some(&json!({ "highest_day_of_week": 6 })));
        assert_eq!(sunday.day.as_deref(), Some("Sunday"));
    }

    #[test]
    fn insights_formats_hours_and_rounds_percentages() {
        let summary = insights(Some(&json!({
            "highest_day_of_week": 3,
            "highest_day_percent": 24.6,
            "highest_hour": 14,
            "highest_hour_percent": 11.2,
        })));

        assert_eq!(summary.day.as_deref(), Some("Thursday"));
        assert_eq!(summary.percent, Some(25));
        assert_eq!(summary.hour.as_deref(), Some("2:00 PM"));
        assert_eq!(summary.hour_percent, Some(11));
    }

    #[test]
    fn clock_labels_cover_midnight_and_noon() {
        assert_eq!(clock_label(0).as_deref(), Some("12:00 AM"));
        assert_eq!(clock_label(12).as_deref(), Some("12:00 PM"));
        assert_eq!(clock_label(23).as_deref(), Some("11:00 PM"));
        assert_eq!(clock_label(24), None);
    }
}
