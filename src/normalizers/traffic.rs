// src/normalizers/traffic.rs
//! Normalizers for traffic-source endpoints: top posts, country views,
//! outbound clicks, referrers, and search terms.

use super::{count_field, id_text, items_at, link_actions, string_field, value_at};
use crate::constants::{
    PLACEHOLDER_FLAG_ICON, UNKNOWN_SEARCH_TERMS_LABEL, UNKNOWN_SEARCH_TERMS_SUPPORT_URL,
};
use crate::period::parse_day;
use crate::query::StatsQuery;
use crate::types::{Action, Label, Site, StatsRecord};
use serde_json::Value;

/// Normalizes the top-posts payload.
///
/// Reads the `summary` bucket or the per-day bucket depending on the
/// query's `summarize` flag. Posts whose own date falls inside the period
/// are marked `published`; archive and home pages carry no date and are
/// never marked. Detail-page links require site context.
pub fn top_posts(
    payload: Option<&Value>,
    query: &StatsQuery,
    site: Option<&Site>,
) -> Vec<StatsRecord> {
    let Some(range) = query.period_range() else {
        return Vec::new();
    };
    let day_key = range.start_key();
    let views = if query.summarize {
        items_at(payload, &["summary", "postviews"])
    } else {
        items_at(payload, &["days", &day_key, "postviews"])
    };

    views
        .iter()
        .map(|item| {
            let page = site.and_then(|site| {
                id_text(item.get("id")).map(|id| format!("/stats/post/{}/{}", id, site.slug))
            });
            let in_period = item
                .get("date")
                .and_then(Value::as_str)
                .and_then(parse_day)
                .map(|post_date| range.contains(post_date))
                .unwrap_or(false);

            StatsRecord {
                label: Label::text(string_field(item, "title").unwrap_or_default()),
                value: count_field(item, "views"),
                page,
                actions: link_actions(string_field(item, "href")),
                class_name: in_period.then(|| "published".to_string()),
                ..Default::default()
            }
        })
        .collect()
}

/// Normalizes the country-views payload.
///
/// Each view entry is joined against the payload's own `country-info`
/// table; entries with an unknown country code are dropped. The
/// placeholder grey flag is suppressed, and the typographic apostrophe is
/// replaced in country names because it breaks the downstream geo chart.
pub fn country_views(payload: Option<&Value>, query: &StatsQuery) -> Vec<StatsRecord> {
    let Some(range) = query.period_range() else {
        return Vec::new();
    };
    let day_key = range.start_key();
    let views = if query.summarize {
        items_at(payload, &["summary", "views"])
    } else {
        items_at(payload, &["days", &day_key, "views"])
    };
    let country_info = value_at(payload, &["country-info"]);

    views
        .iter()
        .filter_map(|view| {
            let code = view.get("country_code")?.as_str()?;
            let country = country_info?.get(code)?;
            let icon = string_field(country, "flat_flag_icon")
                .filter(|icon| !icon.contains(PLACEHOLDER_FLAG_ICON));
            let name = string_field(country, "country_full")
                .unwrap_or_default()
                .replacen('\u{2019}', "'", 1);

            Some(StatsRecord {
                label: Label::text(name),
                value: count_field(view, "views"),
                region: string_field(country, "map_region"),
                icon,
                ..Default::default()
            })
        })
        .collect()
}

/// Normalizes the outbound-clicks payload. Clicks nest one level deep;
/// the `external` link icon is only shown on rows without children.
pub fn clicks(payload: Option<&Value>, query: &StatsQuery) -> Vec<StatsRecord> {
    let Some(range) = query.period_range() else {
        return Vec::new();
    };
    let day_key = range.start_key();
    let rows = items_at(payload, &["days", &day_key, "clicks"]);

    rows.iter()
        .map(|item| {
            let children: Vec<StatsRecord> = items_at(Some(item), &["children"])
                .iter()
                .map(|child| StatsRecord {
                    label: Label::text(string_field(child, "name").unwrap_or_default()),
                    value: count_field(child, "views"),
                    link: string_field(child, "url"),
                    label_icon: Some("external".to_string()),
                    ..Default::default()
                })
                .collect();

            StatsRecord {
                label: Label::text(string_field(item, "name").unwrap_or_default()),
                value: count_field(item, "views"),
                link: string_field(item, "url"),
                icon: string_field(item, "icon"),
                label_icon: children.is_empty().then(|| "external".to_string()),
                ..Default::default()
            }
            .with_children(children)
        })
        .collect()
}

/// Normalizes the referrers payload.
///
/// Referrer groups nest recursively through `results`. Groups that look
/// self-referential get a `spam` moderation action and the row menu flag.
pub fn referrers(
    payload: Option<&Value>,
    query: &StatsQuery,
    site_id: Option<u64>,
) -> Vec<StatsRecord> {
    let Some(range) = query.period_range() else {
        return Vec::new();
    };
    let day_key = range.start_key();
    let groups = items_at(payload, &["days", &day_key, "groups"]);

    groups
        .iter()
        .map(|group| {
            let name = string_field(group, "name").unwrap_or_default();
            let url = string_field(group, "url");
            let group_tag = string_field(group, "group");

            let actions = if is_self_referential(&name, url.as_deref(), group_tag.as_deref()) {
                vec![Action::Spam {
                    site_id,
                    domain: name.clone(),
                }]
            } else {
                Vec::new()
            };
            let action_menu = !actions.is_empty();

            let children: Vec<StatsRecord> = items_at(Some(group), &["results"])
                .iter()
                .map(parse_referrer)
                .collect();

            StatsRecord {
                label: Label::text(name),
                value: count_field(group, "total"),
                link: url,
                icon: string_field(group, "icon"),
                label_icon: children.is_empty().then(|| "external".to_string()),
                actions,
                action_menu,
                ..Default::default()
            }
            .with_children(children)
        })
        .collect()
}

/// A referrer domain that advertises itself: its URL contains its own name,
/// or it has no URL and its group-level name looks like a bare domain.
fn is_self_referential(name: &str, url: Option<&str>, group: Option<&str>) -> bool {
    if name.is_empty() {
        return false;
    }
    match url {
        Some(url) if !url.is_empty() => url.contains(name),
        _ => group == Some(name) && name.contains('.'),
    }
}

fn parse_referrer(item: &Value) -> StatsRecord {
    let children: Vec<StatsRecord> = items_at(Some(item), &["children"])
        .iter()
        .map(parse_referrer)
        .collect();

    StatsRecord {
        label: Label::text(string_field(item, "name").unwrap_or_default()),
        value: count_field(item, "views"),
        link: string_field(item, "url"),
        icon: string_field(item, "icon"),
        label_icon: children.is_empty().then(|| "external".to_string()),
        ..Default::default()
    }
    .with_children(children)
}

/// Normalizes the search-terms payload.
///
/// When the payload reports an aggregate of terms hidden by encrypted
/// referrers, one synthetic trailing row surfaces that count with a link to
/// the help article. The row is not part of the raw per-day list.
pub fn search_terms(payload: Option<&Value>, query: &StatsQuery) -> Vec<StatsRecord> {
    let Some(range) = query.period_range() else {
        return Vec::new();
    };
    let day_key = range.start_key();
    let terms = items_at(payload, &["days", &day_key, "search_terms"]);

    let mut rows: Vec<StatsRecord> = terms
        .iter()
        .map(|term| StatsRecord {
            label: Label::text(string_field(term, "term").unwrap_or_default()),
            class_name: Some("user-selectable".to_string()),
            value: count_field(term, "views"),
            ..Default::default()
        })
        .collect();

    let encrypted = value_at(payload, &["days", &day_key, "encrypted_search_terms"])
        .and_then(Value::as_u64)
        .filter(|count| *count > 0);
    if let Some(count) = encrypted {
        rows.push(StatsRecord {
            label: Label::text(UNKNOWN_SEARCH_TERMS_LABEL),
            value: Some(count),
            link: Some(UNKNOWN_SEARCH_TERMS_SUPPORT_URL.to_string()),
            label_icon: Some("external".to_string()),
            ..Default::default()
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_referential_detection_covers_both_branches() {
        // URL containing the referrer's own name.
        assert!(is_self_referential(
            "example.com",
            Some("https://example.com/page"),
            None
        ));
        assert!(!is_self_referential(
            "example.com",
            Some("https://other.net/page"),
            Some("example.com")
        ));

        // No URL: bare-domain name matching its group.
        assert!(is_self_referential(
            "spammy.site",
            None,
            Some("spammy.site")
        ));
        assert!(!is_self_referential("Search Engines", None, Some("Search Engines")));
        assert!(!is_self_referential("spammy.site", None, Some("Referrers")));
        assert!(!is_self_referential("", None, Some("")));
    }
}
