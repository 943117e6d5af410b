// src/constants.rs
//! Domain constants and static lookup tables.
//!
//! Every table here is immutable after first access; normalizers read them
//! but never write. Entries missing from a table are dropped by the
//! consuming normalizer rather than guessed at.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Display label and icon for one publicize (social sharing) service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceBadge {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Publicize service name → display badge.
pub static PUBLICIZE_SERVICES_LABEL_ICON: Lazy<HashMap<&'static str, ServiceBadge>> =
    Lazy::new(|| {
        HashMap::from([
            (
                "facebook",
                ServiceBadge {
                    label: "Facebook",
                    icon: "facebook",
                },
            ),
            (
                "twitter",
                ServiceBadge {
                    label: "Twitter",
                    icon: "twitter",
                },
            ),
            (
                "google_plus",
                ServiceBadge {
                    label: "Google+",
                    icon: "google-plus",
                },
            ),
            (
                "tumblr",
                ServiceBadge {
                    label: "Tumblr",
                    icon: "tumblr",
                },
            ),
            (
                "linkedin",
                ServiceBadge {
                    label: "LinkedIn",
                    icon: "linkedin",
                },
            ),
            (
                "path",
                ServiceBadge {
                    label: "Path",
                    icon: "path",
                },
            ),
            (
                "eventbrite",
                ServiceBadge {
                    label: "Eventbrite",
                    icon: "eventbrite",
                },
            ),
        ])
    });

// ---------------------------------------------------------------------------
// Search terms
// ---------------------------------------------------------------------------

/// Label of the synthetic row aggregating search terms hidden by encrypted
/// referrers.
pub const UNKNOWN_SEARCH_TERMS_LABEL: &str = "Unknown Search Terms";

/// Help article explaining why some search terms are unavailable.
pub const UNKNOWN_SEARCH_TERMS_SUPPORT_URL: &str =
    "http://en.support.wordpress.com/stats/#search-engine-terms";

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Query string pinned onto avatar URLs to request the "mystery man"
/// default image for users without one.
pub const AVATAR_DEFAULT_QUERY: &str = "d=mm";

/// Placeholder flag icon served for countries without real flag art.
/// Suppressed rather than shown.
pub const PLACEHOLDER_FLAG_ICON: &str = "grey.png";

/// How many trailing points of a per-video plays series are kept.
pub const VIDEO_SERIES_WINDOW: usize = 10;
