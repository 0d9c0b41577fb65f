//! Per-interval deltas between two `top` snapshots.
//!
//! This module is the only place where counters are differenced; the
//! renderer only formats what comes out of [`diff`].

use std::cmp::Ordering;

use tracing::warn;

use crate::models::{Counter, Delta, DisplayMode, EventKind, NamespaceStats, Snapshot};

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Difference of one counter in the given mode.
///
/// Time deltas are converted from microseconds to whole milliseconds
/// (integer division, truncating toward zero). The result is negative when
/// the counter went backwards, which happens across a server restart.
#[inline]
pub fn counter_delta(prev: Counter, curr: Counter, mode: DisplayMode) -> i64 {
    match mode {
        DisplayMode::Count => curr.count.wrapping_sub(prev.count),
        DisplayMode::Time => curr.time.wrapping_sub(prev.time) / 1000,
    }
}

/// Differences for every event kind of one namespace.
pub fn namespace_delta(
    prev: &NamespaceStats,
    curr: &NamespaceStats,
    mode: DisplayMode,
) -> [i64; EventKind::COUNT] {
    let mut values = [0; EventKind::COUNT];
    for kind in EventKind::ALL {
        values[kind.index()] = counter_delta(prev.get(kind), curr.get(kind), mode);
    }
    values
}

/// Descending by sort key, then ascending by namespace.
pub fn delta_order(a: &Delta, b: &Delta) -> Ordering {
    b.sort_key
        .cmp(&a.sort_key)
        .then_with(|| a.namespace.cmp(&b.namespace))
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

/// Pairs two snapshots into sorted per-namespace deltas.
///
/// Only namespaces present in both snapshots are reported; a namespace that
/// just appeared has no baseline yet and shows up from the next tick on.
/// `sort_by` selects the event whose delta becomes the sort key; with `None`
/// every sort key is 0 and the order is by namespace alone.
///
/// Negative deltas are kept as computed and logged.
pub fn diff(
    prior: &Snapshot,
    current: &Snapshot,
    sort_by: Option<EventKind>,
    mode: DisplayMode,
) -> Vec<Delta> {
    let mut deltas: Vec<Delta> = current
        .namespaces
        .iter()
        .filter_map(|(namespace, curr)| {
            let prev = prior.get(namespace)?;
            let values = namespace_delta(prev, curr, mode);
            report_regressions(namespace, &values);
            Some(Delta {
                namespace: namespace.clone(),
                sort_key: sort_by.map_or(0, |kind| values[kind.index()]),
                values,
            })
        })
        .collect();

    deltas.sort_by(delta_order);
    deltas
}

fn report_regressions(namespace: &str, values: &[i64; EventKind::COUNT]) {
    for kind in EventKind::ALL {
        let value = values[kind.index()];
        if value < 0 {
            warn!(
                namespace,
                event = kind.wire_name(),
                delta = value,
                "counter went backwards, server restarted?"
            );
        }
    }
}
