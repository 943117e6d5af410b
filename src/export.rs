// src/export.rs
//! Flattens a canonical record tree into rows for CSV export.

use crate::types::StatsRecord;

/// One export row: the quoted, escaped label path and the numeric value.
pub type ExportRow = (String, u64);

/// Flattens `record` and its children, depth-first, into `(label, value)`
/// rows. Nested rows inherit their ancestry as a ` > `-separated label path.
///
/// Records without a displayable label, or with a missing or zero value,
/// produce no rows at all; a zero count reads as "no data" in the export.
pub fn build_export_rows(record: Option<&StatsRecord>, parent: Option<&str>) -> Vec<ExportRow> {
    let Some(record) = record else {
        return Vec::new();
    };

    let label = record.label.to_string();
    let value = record.value.unwrap_or(0);
    if label.is_empty() || value == 0 {
        return Vec::new();
    }

    let path = match parent {
        Some(parent) => format!("{} > {}", parent, label),
        None => label,
    };

    let mut rows = vec![(quote_label(&path), value)];

    if let Some(children) = &record.children {
        for child in children {
            rows.extend(build_export_rows(Some(child), Some(&path)));
        }
    }

    rows
}

/// Wraps a label in double quotes. Only the first embedded quote is doubled;
/// the export format has always shipped this way and downstream consumers
/// expect it unchanged.
fn quote_label(label: &str) -> String {
    format!("\"{}\"", label.replacen('"', "\"\"", 1))
}
