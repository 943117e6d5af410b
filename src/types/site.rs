// src/types/site.rs
//! Site context used to build drill-down links and moderation actions.

use serde::{Deserialize, Serialize};

/// The slice of the site object the normalizers care about. The upstream
/// site record is much larger; anything beyond these fields is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    #[serde(rename = "ID")]
    pub id: u64,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Site {
    pub fn new(id: u64, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            domain: None,
        }
    }
}
