// src/query.rs
//! Stats query inputs and their serialized cache keys.

use crate::period::{range_of_period, Period, PeriodRange};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Read-only query accompanying a stats request.
///
/// `period` and `date` drive the per-day bucket selection; `summarize`
/// switches certain endpoints to their aggregate bucket. Endpoint-specific
/// filters ride along in `extra`, preserved in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub summarize: bool,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl StatsQuery {
    pub fn for_period(period: Period, date: NaiveDate) -> Self {
        Self {
            period: Some(period),
            date: Some(date),
            ..Default::default()
        }
    }

    /// Period boundaries for this query, if it names both a period and a
    /// date. Normalizers that bucket by day bail out to their empty value
    /// when this is `None`.
    pub fn period_range(&self) -> Option<PeriodRange> {
        Some(range_of_period(self.period?, self.date?))
    }

    /// Stable cache key for this query; field order never affects the
    /// result.
    pub fn serialized(&self) -> String {
        let params = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            _ => IndexMap::new(),
        };
        serialized_stats_query(&params)
    }
}

/// Serializes a query parameter mapping into a stable, order-independent
/// string key: entries are sorted lexicographically by name and rendered as
/// a JSON array of `[name, value]` pairs. Two mappings with the same pairs
/// always produce the same key.
pub fn serialized_stats_query(params: &IndexMap<String, Value>) -> String {
    let mut pairs: Vec<(&String, &Value)> = params.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    Value::Array(
        pairs
            .into_iter()
            .map(|(name, value)| Value::Array(vec![Value::String(name.clone()), value.clone()]))
            .collect(),
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(entries: &[(&str, Value)]) -> IndexMap<String, Value> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn serialization_ignores_insertion_order() {
        let forward = params(&[("a", json!(1)), ("b", json!(2))]);
        let backward = params(&[("b", json!(2)), ("a", json!(1))]);

        assert_eq!(
            serialized_stats_query(&forward),
            serialized_stats_query(&backward)
        );
        assert_eq!(serialized_stats_query(&forward), r#"[["a",1],["b",2]]"#);
    }

    #[test]
    fn different_pairs_serialize_differently() {
        let one = params(&[("period", json!("day")), ("date", json!("2016-06-01"))]);
        let other = params(&[("period", json!("week")), ("date", json!("2016-06-01"))]);

        assert_ne!(serialized_stats_query(&one), serialized_stats_query(&other));
    }

    #[test]
    fn empty_queries_serialize_to_an_empty_pair_list() {
        assert_eq!(serialized_stats_query(&IndexMap::new()), "[]");
        assert_eq!(StatsQuery::default().serialized(), "[]");
    }

    #[test]
    fn query_fields_and_extras_share_one_key_space() {
        let mut query = StatsQuery::for_period(
            Period::Week,
            NaiveDate::from_ymd_opt(2016, 6, 1).expect("valid test date"),
        );
        query
            .extra
            .insert("max".to_string(), json!(10));

        assert_eq!(
            query.serialized(),
            r#"[["date","2016-06-01"],["max",10],["period","week"]]"#
        );
    }

    #[test]
    fn period_range_requires_both_period_and_date() {
        assert_eq!(StatsQuery::default().period_range(), None);

        let query = StatsQuery {
            period: Some(Period::Day),
            ..Default::default()
        };
        assert_eq!(query.period_range(), None);

        let full = StatsQuery::for_period(
            Period::Day,
            NaiveDate::from_ymd_opt(2016, 6, 1).expect("valid test date"),
        );
        assert_eq!(full.period_range().map(|r| r.start_key()).as_deref(), Some("2016-06-01"));
    }
}
