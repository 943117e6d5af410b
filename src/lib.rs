// src/lib.rs
//! stats2rows library — normalizes site-statistics API payloads into a
//! canonical record tree.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `ValidationError`
//! - **Canonical model** — `StatsRecord`, `Label`, `Action`, `Site`
//! - **Period arithmetic** — `Period`, `PeriodRange`, `range_of_period`
//! - **Queries** — `StatsQuery`, `serialized_stats_query`
//! - **Normalizers** — `StatsEndpoint`, `NormalizedStats`, one function per
//!   endpoint under [`normalizers`]
//! - **Export** — `build_export_rows`
//!
//! Everything here is pure and synchronous: payloads arrive as already
//! parsed [`serde_json::Value`]s, normalization mutates nothing, and the
//! only shared state is a handful of immutable lookup tables.

mod constants;
mod error;
mod export;
pub mod normalizers;
mod period;
mod query;
mod types;

// --- Error Handling ---
pub use crate::error::ValidationError;

// --- Canonical Model ---
pub use crate::types::{
    Action, InsightsSummary, Label, LabelPart, SeriesPoint, Site, StatsRecord,
};

// --- Period Arithmetic ---
pub use crate::period::{range_of_period, Period, PeriodRange};

// --- Queries ---
pub use crate::query::{serialized_stats_query, StatsQuery};

// --- Normalizers ---
pub use crate::normalizers::{NormalizedStats, StatsEndpoint};

// --- Export ---
pub use crate::export::{build_export_rows, ExportRow};

// --- Lookup Tables ---
pub use crate::constants::{ServiceBadge, PUBLICIZE_SERVICES_LABEL_ICON};
