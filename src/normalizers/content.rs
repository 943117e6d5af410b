// src/normalizers/content.rs
//! Normalizers for content-centric endpoints: publicize followers, video
//! plays, authors, and tag groups.

use super::{count_field, id_text, items_at, link_actions, string_field};
use crate::constants::{AVATAR_DEFAULT_QUERY, PUBLICIZE_SERVICES_LABEL_ICON, VIDEO_SERIES_WINDOW};
use crate::query::StatsQuery;
use crate::types::{Label, LabelPart, SeriesPoint, Site, StatsRecord};
use serde_json::Value;
use url::Url;

/// Normalizes publicize follower counts through the static service table.
/// Services missing from the table are dropped.
pub fn publicize(payload: Option<&Value>) -> Vec<StatsRecord> {
    items_at(payload, &["services"])
        .iter()
        .filter_map(|service| {
            let name = service.get("service")?.as_str()?;
            let badge = PUBLICIZE_SERVICES_LABEL_ICON.get(name)?;
            Some(StatsRecord {
                label: Label::text(badge.label),
                icon: Some(badge.icon.to_string()),
                value: count_field(service, "followers"),
                ..Default::default()
            })
        })
        .collect()
}

/// Normalizes the per-day video plays payload. Detail-page links carry the
/// query period and post id, and require site context.
pub fn video_plays(
    payload: Option<&Value>,
    query: &StatsQuery,
    site: Option<&Site>,
) -> Vec<StatsRecord> {
    let Some(range) = query.period_range() else {
        return Vec::new();
    };
    let day_key = range.start_key();
    let plays = items_at(payload, &["days", &day_key, "plays"]);

    plays
        .iter()
        .map(|item| {
            let page = match (site, query.period, id_text(item.get("post_id"))) {
                (Some(site), Some(period), Some(post_id)) => Some(format!(
                    "/stats/{}/videodetails/{}?post={}",
                    period, site.slug, post_id
                )),
                _ => None,
            };

            StatsRecord {
                label: Label::text(string_field(item, "title").unwrap_or_default()),
                page,
                value: count_field(item, "plays"),
                actions: link_actions(string_field(item, "url")),
                ..Default::default()
            }
        })
        .collect()
}

/// Normalizes a single video's play history into its trailing series
/// window.
///
/// The window keeps at most the last [`VIDEO_SERIES_WINDOW`] points but
/// never starts before index 1, so short series still lose their first
/// point. Kept exactly as the upstream API consumers expect; pinned by
/// test.
pub fn video_details(payload: Option<&Value>) -> Vec<SeriesPoint> {
    let data = items_at(payload, &["data"]);
    if data.is_empty() {
        return Vec::new();
    }

    let start = data.len().saturating_sub(VIDEO_SERIES_WINDOW).max(1);
    data.iter()
        .skip(start)
        .map(|pair| SeriesPoint {
            period: id_text(pair.get(0)).unwrap_or_default(),
            value: pair.get(1).and_then(Value::as_u64).unwrap_or(0),
        })
        .collect()
}

/// Normalizes the top-authors payload. Each author's top posts nest as
/// children; the author's avatar is rewritten to a stable URL with the
/// default-image fallback pinned.
pub fn top_authors(
    payload: Option<&Value>,
    query: &StatsQuery,
    site: Option<&Site>,
) -> Vec<StatsRecord> {
    let Some(range) = query.period_range() else {
        return Vec::new();
    };
    let day_key = range.start_key();
    let authors = items_at(payload, &["days", &day_key, "authors"]);

    authors
        .iter()
        .map(|author| {
            let posts: Vec<StatsRecord> = items_at(Some(author), &["posts"])
                .iter()
                .map(|post| StatsRecord {
                    label: Label::text(string_field(post, "title").unwrap_or_default()),
                    value: count_field(post, "views"),
                    page: site.and_then(|site| {
                        id_text(post.get("id"))
                            .map(|id| format!("/stats/post/{}/{}", id, site.slug))
                    }),
                    actions: link_actions(string_field(post, "url")),
                    ..Default::default()
                })
                .collect();

            StatsRecord {
                label: Label::text(string_field(author, "name").unwrap_or_default()),
                icon_class: Some("avatar-user".to_string()),
                icon: author
                    .get("avatar")
                    .and_then(Value::as_str)
                    .and_then(parse_avatar),
                value: count_field(author, "views"),
                class_name: Some("module-content-list-item-large".to_string()),
                ..Default::default()
            }
            .with_children(posts)
        })
        .collect()
}

/// Strips any existing query from an avatar URL and pins the default-image
/// fallback.
fn parse_avatar(avatar: &str) -> Option<String> {
    let mut url = Url::parse(avatar).ok()?;
    url.set_query(Some(AVATAR_DEFAULT_QUERY));
    Some(url.to_string())
}

/// Normalizes the tags payload.
///
/// A tag group with several variants has no single link target, so the
/// group row carries no link and exposes the variants as children;
/// single-variant groups link directly.
pub fn tags(payload: Option<&Value>) -> Vec<StatsRecord> {
    items_at(payload, &["tags"])
        .iter()
        .map(|group| {
            let variants = items_at(Some(group), &["tags"]);
            let multi = variants.len() > 1;

            let parts: Vec<LabelPart> = variants
                .iter()
                .map(|tag| LabelPart {
                    label: string_field(tag, "name").unwrap_or_default(),
                    label_icon: tag_type_icon(tag.get("type").and_then(Value::as_str)),
                    link: if multi {
                        None
                    } else {
                        string_field(tag, "link")
                    },
                })
                .collect();

            let children: Vec<StatsRecord> = if multi {
                variants
                    .iter()
                    .map(|tag| StatsRecord {
                        label: Label::text(string_field(tag, "name").unwrap_or_default()),
                        label_icon: tag_type_icon(tag.get("type").and_then(Value::as_str)),
                        link: string_field(tag, "link"),
                        ..Default::default()
                    })
                    .collect()
            } else {
                Vec::new()
            };

            let link = if multi {
                None
            } else {
                parts.first().and_then(|part| part.link.clone())
            };

            StatsRecord {
                label: Label::Parts(parts),
                link,
                value: count_field(group, "views"),
                ..Default::default()
            }
            .with_children(children)
        })
        .collect()
}

/// Categories reuse the folder glyph; every other tag type names its own
/// icon.
fn tag_type_icon(tag_type: Option<&str>) -> Option<String> {
    match tag_type {
        Some("category") => Some("folder".to_string()),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}
