// src/normalizers/mod.rs
//! Per-endpoint payload normalizers.
//!
//! Each endpoint of the upstream stats API delivers its own loosely-typed
//! payload shape. One normalizer per endpoint converts that payload into the
//! canonical record tree (or one of the few non-tree shapes), returning the
//! endpoint's documented empty value whenever the payload or query fails its
//! preconditions. Normalizers are pure: no I/O, no shared mutable state, and
//! the same inputs always produce the same output.

mod content;
mod overview;
mod traffic;

pub use content::{publicize, tags, top_authors, video_details, video_plays};
pub use overview::{insights, stats};
pub use traffic::{clicks, country_views, referrers, search_terms, top_posts};

use crate::error::ValidationError;
use crate::query::StatsQuery;
use crate::types::{Action, InsightsSummary, SeriesPoint, Site, StatsRecord};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The closed set of stats endpoints this crate can normalize.
///
/// Endpoint selection used to be dynamic dispatch over a string-keyed map;
/// here it is a typed vocabulary, with `FromStr` accepting the upstream
/// endpoint names for callers that still carry them as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsEndpoint {
    Stats,
    Insights,
    TopPosts,
    CountryViews,
    Publicize,
    VideoPlays,
    Video,
    TopAuthors,
    Tags,
    Clicks,
    Referrers,
    SearchTerms,
}

impl StatsEndpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsEndpoint::Stats => "stats",
            StatsEndpoint::Insights => "statsInsights",
            StatsEndpoint::TopPosts => "statsTopPosts",
            StatsEndpoint::CountryViews => "statsCountryViews",
            StatsEndpoint::Publicize => "statsPublicize",
            StatsEndpoint::VideoPlays => "statsVideoPlays",
            StatsEndpoint::Video => "statsVideo",
            StatsEndpoint::TopAuthors => "statsTopAuthors",
            StatsEndpoint::Tags => "statsTags",
            StatsEndpoint::Clicks => "statsClicks",
            StatsEndpoint::Referrers => "statsReferrers",
            StatsEndpoint::SearchTerms => "statsSearchTerms",
        }
    }

    /// Runs the normalizer for this endpoint.
    ///
    /// `site_id` and `site` are optional context used to build drill-down
    /// links and moderation actions; endpoints that need neither ignore
    /// them.
    pub fn normalize(
        &self,
        payload: Option<&Value>,
        query: &StatsQuery,
        site_id: Option<u64>,
        site: Option<&Site>,
    ) -> NormalizedStats {
        log::trace!("normalizing {} payload", self);
        match self {
            StatsEndpoint::Stats => match stats(payload) {
                Some(totals) => NormalizedStats::Totals(totals),
                None => NormalizedStats::None,
            },
            StatsEndpoint::Insights => NormalizedStats::Insights(insights(payload)),
            StatsEndpoint::TopPosts => NormalizedStats::Records(top_posts(payload, query, site)),
            StatsEndpoint::CountryViews => {
                NormalizedStats::Records(country_views(payload, query))
            }
            StatsEndpoint::Publicize => NormalizedStats::Records(publicize(payload)),
            StatsEndpoint::VideoPlays => {
                NormalizedStats::Records(video_plays(payload, query, site))
            }
            StatsEndpoint::Video => NormalizedStats::Series(video_details(payload)),
            StatsEndpoint::TopAuthors => {
                NormalizedStats::Records(top_authors(payload, query, site))
            }
            StatsEndpoint::Tags => NormalizedStats::Records(tags(payload)),
            StatsEndpoint::Clicks => NormalizedStats::Records(clicks(payload, query)),
            StatsEndpoint::Referrers => {
                NormalizedStats::Records(referrers(payload, query, site_id))
            }
            StatsEndpoint::SearchTerms => {
                NormalizedStats::Records(search_terms(payload, query))
            }
        }
    }
}

impl FromStr for StatsEndpoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stats" => Ok(StatsEndpoint::Stats),
            "statsInsights" => Ok(StatsEndpoint::Insights),
            "statsTopPosts" => Ok(StatsEndpoint::TopPosts),
            "statsCountryViews" => Ok(StatsEndpoint::CountryViews),
            "statsPublicize" => Ok(StatsEndpoint::Publicize),
            "statsVideoPlays" => Ok(StatsEndpoint::VideoPlays),
            "statsVideo" => Ok(StatsEndpoint::Video),
            "statsTopAuthors" => Ok(StatsEndpoint::TopAuthors),
            "statsTags" => Ok(StatsEndpoint::Tags),
            "statsClicks" => Ok(StatsEndpoint::Clicks),
            "statsReferrers" => Ok(StatsEndpoint::Referrers),
            "statsSearchTerms" => Ok(StatsEndpoint::SearchTerms),
            other => Err(ValidationError::UnknownEndpoint(other.to_string())),
        }
    }
}

impl fmt::Display for StatsEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a normalizer run.
///
/// Most endpoints produce canonical record lists. A few have intentionally
/// different contracts that callers rely on: `stats` yields a flat totals
/// map or nothing at all, `statsInsights` yields a single summary record
/// even when empty, and `statsVideo` yields a plain time series.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedStats {
    /// The `stats` endpoint's missing-payload result.
    None,
    /// Flat site totals, re-keyed to camelCase.
    Totals(IndexMap<String, Value>),
    /// Best day/hour summary; empty on precondition failure.
    Insights(InsightsSummary),
    /// Canonical record rows, possibly empty.
    Records(Vec<StatsRecord>),
    /// Trailing window of a per-video plays series.
    Series(Vec<SeriesPoint>),
}

// ---------------------------------------------------------------------------
// Shared payload access helpers
// ---------------------------------------------------------------------------

/// The value at `path` below `payload`, if every step exists.
pub(crate) fn value_at<'a>(payload: Option<&'a Value>, path: &[&str]) -> Option<&'a Value> {
    let mut current = payload?;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

/// Array items at `path` below `payload`, or an empty slice.
pub(crate) fn items_at<'a>(payload: Option<&'a Value>, path: &[&str]) -> &'a [Value] {
    value_at(payload, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// An owned string field, absent when missing or not a string.
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// A non-negative integer field, absent when missing or differently typed.
pub(crate) fn count_field(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64)
}

/// Renders an id field that may arrive as either a number or a string.
pub(crate) fn id_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// A single `link` action when the row has an outbound URL.
pub(crate) fn link_actions(url: Option<String>) -> Vec<Action> {
    url.map(Action::Link).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn endpoint_names_round_trip() {
        let endpoints = [
            StatsEndpoint::Stats,
            StatsEndpoint::Insights,
            StatsEndpoint::TopPosts,
            StatsEndpoint::CountryViews,
            StatsEndpoint::Publicize,
            StatsEndpoint::VideoPlays,
            StatsEndpoint::Video,
            StatsEndpoint::TopAuthors,
            StatsEndpoint::Tags,
            StatsEndpoint::Clicks,
            StatsEndpoint::Referrers,
            StatsEndpoint::SearchTerms,
        ];
        for endpoint in endpoints {
            assert_eq!(endpoint.as_str().parse::<StatsEndpoint>(), Ok(endpoint));
        }
        assert_eq!(
            "statsNope".parse::<StatsEndpoint>(),
            Err(ValidationError::UnknownEndpoint("statsNope".to_string()))
        );
    }

    #[test]
    fn value_at_walks_nested_objects() {
        let payload = json!({ "days": { "2016-06-01": { "views": [1, 2] } } });

        assert_eq!(
            value_at(Some(&payload), &["days", "2016-06-01", "views"]),
            Some(&json!([1, 2]))
        );
        assert_eq!(value_at(Some(&payload), &["days", "2016-06-02"]), None);
        assert_eq!(value_at(None, &["days"]), None);
    }

    #[test]
    fn items_at_defaults_to_an_empty_slice() {
        let payload = json!({ "data": [1, 2, 3], "scalar": 7 });

        assert_eq!(items_at(Some(&payload), &["data"]).len(), 3);
        assert!(items_at(Some(&payload), &["scalar"]).is_empty());
        assert!(items_at(Some(&payload), &["missing"]).is_empty());
        assert!(items_at(None, &["data"]).is_empty());
    }

    #[test]
    fn id_text_accepts_numbers_and_strings() {
        assert_eq!(id_text(Some(&json!(123))), Some("123".to_string()));
        assert_eq!(id_text(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(id_text(Some(&json!(null))), None);
        assert_eq!(id_text(None), None);
    }
}
