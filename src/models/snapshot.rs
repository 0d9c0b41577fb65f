//! Snapshot structures for sampled `top` counters.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::EventKind;

/// A cumulative `(time, count)` pair as reported by the server.
///
/// `time` is microseconds of cumulative work, `count` a cumulative event
/// count. Both only grow while the server stays up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Counter {
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub count: i64,
}

impl Counter {
    pub const fn new(time: i64, count: i64) -> Self {
        Self { time, count }
    }
}

/// Counters for one namespace, one per [`EventKind`].
///
/// Every kind is always present; kinds missing from the server reply are
/// `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamespaceStats {
    counters: [Counter; EventKind::COUNT],
}

impl NamespaceStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, kind: EventKind) -> Counter {
        self.counters[kind.index()]
    }

    #[inline]
    pub fn set(&mut self, kind: EventKind, counter: Counter) {
        self.counters[kind.index()] = counter;
    }

    /// Builder-style [`NamespaceStats::set`].
    pub fn with(mut self, kind: EventKind, time: i64, count: i64) -> Self {
        self.set(kind, Counter::new(time, count));
        self
    }

    /// Iterates `(kind, counter)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EventKind, Counter)> + '_ {
        EventKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Immutable result of one `top` sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Per-namespace counters, ordered by namespace.
    pub namespaces: BTreeMap<String, NamespaceStats>,
    /// Whether the server accepted the request.
    pub ok: bool,
}

impl Snapshot {
    pub fn new(namespaces: BTreeMap<String, NamespaceStats>, ok: bool) -> Self {
        Self { namespaces, ok }
    }

    pub fn get(&self, namespace: &str) -> Option<&NamespaceStats> {
        self.namespaces.get(namespace)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl FromIterator<(String, NamespaceStats)> for Snapshot {
    /// Collects into an accepted (`ok`) snapshot.
    fn from_iter<I: IntoIterator<Item = (String, NamespaceStats)>>(iter: I) -> Self {
        Self {
            namespaces: iter.into_iter().collect(),
            ok: true,
        }
    }
}
