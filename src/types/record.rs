// src/types/record.rs
//! The canonical record tree produced by every stats normalizer.
//!
//! Whatever shape an endpoint payload arrives in, normalization ends here:
//! an ordered list of `StatsRecord` rows, optionally nested through
//! `children`, consumed uniformly by list/tree rendering and CSV export.

use serde::Serialize;
use std::fmt;

/// Row label: plain text, or an ordered sequence of sub-labels each carrying
/// its own icon and link (tag groups render one sub-label per tag variant).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    Parts(Vec<LabelPart>),
}

impl Label {
    pub fn text(label: impl Into<String>) -> Self {
        Label::Text(label.into())
    }

    /// Whether there is anything to display at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Label::Text(text) => text.is_empty(),
            Label::Parts(parts) => parts.is_empty(),
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Text(String::new())
    }
}

impl fmt::Display for Label {
    /// Plain text as-is; multi-part labels are joined for flat consumers
    /// such as the CSV export.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(text) => f.write_str(text),
            Label::Parts(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&part.label)?;
                }
                Ok(())
            }
        }
    }
}

/// One sub-label of a multi-part label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPart {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Row-level action affordance.
///
/// A closed vocabulary instead of stringly-typed `type` tags; serialization
/// still emits the `type`/`data` wire shape the list modules expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Action {
    /// Open the outbound URL for this row.
    Link(String),
    /// Flag a self-referential referrer domain for moderation.
    Spam {
        #[serde(rename = "siteID", skip_serializing_if = "Option::is_none")]
        site_id: Option<u64>,
        domain: String,
    },
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One row of normalized statistics.
///
/// Only `label` is always meaningful; every other field is filled per
/// endpoint. `children` is `None` or non-empty — an empty child list is
/// never materialized, so presence is checked by nullity, not length.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    /// Deep link into the stats UI for drill-down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Leading image: flag, service icon, avatar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Extra class applied to the leading icon (e.g. avatar styling).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_class: Option<String>,
    /// Trailing semantic icon, e.g. `external` for outbound links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_icon: Option<String>,
    /// Outbound URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Map region hint for geo visualizations (country views only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    /// Whether a row menu affordance should be shown; derived from `actions`.
    #[serde(skip_serializing_if = "is_false")]
    pub action_menu: bool,
    /// Presentation hint, e.g. `published` for posts inside the period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<StatsRecord>>,
}

impl StatsRecord {
    /// Attaches children, preserving the `None`-or-non-empty invariant.
    pub fn with_children(mut self, children: Vec<StatsRecord>) -> Self {
        self.children = if children.is_empty() {
            None
        } else {
            Some(children)
        };
        self
    }

    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn with_children_never_keeps_an_empty_list() {
        let record = StatsRecord {
            label: Label::text("parent"),
            ..Default::default()
        }
        .with_children(Vec::new());

        assert_eq!(record.children, None);
        assert!(!record.has_children());
    }

    #[test]
    fn with_children_keeps_non_empty_lists() {
        let child = StatsRecord {
            label: Label::text("child"),
            value: Some(2),
            ..Default::default()
        };
        let record = StatsRecord {
            label: Label::text("parent"),
            ..Default::default()
        }
        .with_children(vec![child.clone()]);

        assert_eq!(record.children, Some(vec![child]));
        assert!(record.has_children());
    }

    #[test]
    fn multi_part_labels_join_for_flat_display() {
        let label = Label::Parts(vec![
            LabelPart {
                label: "music".to_string(),
                label_icon: Some("tag".to_string()),
                link: None,
            },
            LabelPart {
                label: "reviews".to_string(),
                label_icon: Some("folder".to_string()),
                link: None,
            },
        ]);

        assert_eq!(label.to_string(), "music, reviews");
        assert!(!label.is_empty());
        assert!(Label::text("").is_empty());
    }

    #[test]
    fn records_serialize_with_camel_case_keys_and_no_null_noise() {
        let record = StatsRecord {
            label: Label::text("My Post"),
            value: Some(12),
            label_icon: Some("external".to_string()),
            actions: vec![Action::Link("https://example.com/post".to_string())],
            ..Default::default()
        };

        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "label": "My Post",
                "value": 12,
                "labelIcon": "external",
                "actions": [ { "type": "link", "data": "https://example.com/post" } ],
            })
        );
    }

    #[test]
    fn spam_actions_carry_site_and_domain() {
        let action = Action::Spam {
            site_id: Some(2916284),
            domain: "example.com".to_string(),
        };

        let json = serde_json::to_value(&action).expect("action serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "type": "spam",
                "data": { "siteID": 2916284, "domain": "example.com" },
            })
        );
    }
}
