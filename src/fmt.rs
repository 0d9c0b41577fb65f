//! Formatting helpers for the live table.
//!
//! Pure string building, no terminal control sequences; those are added by
//! the terminal renderer in `tui`.

use chrono::{DateTime, SecondsFormat, TimeZone};

use crate::models::{Delta, DisplayMode, EventKind};

/// Column order of the table. The namespace column follows these, last,
/// because it is the only variable-width one.
pub const COLUMNS: [EventKind; EventKind::COUNT] = [
    EventKind::Total,
    EventKind::ReadLock,
    EventKind::WriteLock,
    EventKind::Queries,
    EventKind::Insert,
    EventKind::Update,
    EventKind::Remove,
    EventKind::Getmore,
    EventKind::Commands,
];

/// Header label of the namespace column.
pub const NAMESPACE_LABEL: &str = "ns";

/// ISO-8601 timestamp with seconds precision and UTC offset,
/// e.g. `2026-10-19T14:03:07+02:00`.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Banner line text: sort key as typed, unit and timestamp.
pub fn format_banner(sort_key: &str, mode: DisplayMode, timestamp: &str) -> String {
    format!(
        "====== mgotop ====== sort: {} {} ====== {} ======",
        sort_key,
        mode.unit(),
        timestamp
    )
}

/// Tab-separated column header.
pub fn format_header() -> String {
    let mut line = String::new();
    for kind in COLUMNS {
        line.push_str(kind.column_label());
        line.push('\t');
    }
    line.push_str(NAMESPACE_LABEL);
    line
}

/// Tab-separated data row for one delta.
pub fn format_row(delta: &Delta) -> String {
    let mut line = String::new();
    for kind in COLUMNS {
        line.push_str(&delta.value(kind).to_string());
        line.push('\t');
    }
    line.push_str(&delta.namespace);
    line
}
