//! Decoding of the `top` command reply.
//!
//! Expected shape:
//!
//! ```text
//! { totals: { note: "...", "<db>.<coll>": { total: { time, count }, readLock: {...}, ... } }, ok: 1 }
//! ```
//!
//! Unknown top-level and per-namespace fields are ignored, and so are
//! non-document entries inside `totals` (servers put a `note` string there).
//! Numbers may arrive as Int32, Int64 or Double.

use std::collections::BTreeMap;

use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Deserializer};
use tracing::trace;

use super::CollectError;
use crate::models::{Counter, EventKind, NamespaceStats, Snapshot};

#[derive(Deserialize)]
struct TopReply {
    totals: Option<BTreeMap<String, Bson>>,
    #[serde(default, deserialize_with = "lenient_f64")]
    ok: f64,
}

/// Per-namespace document. Every recognised event defaults to `(0, 0)`.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawNamespace {
    #[serde(deserialize_with = "lenient_counter")]
    total: Counter,
    #[serde(rename = "readLock", deserialize_with = "lenient_counter")]
    read_lock: Counter,
    #[serde(rename = "writeLock", deserialize_with = "lenient_counter")]
    write_lock: Counter,
    #[serde(deserialize_with = "lenient_counter")]
    queries: Counter,
    #[serde(deserialize_with = "lenient_counter")]
    getmore: Counter,
    #[serde(deserialize_with = "lenient_counter")]
    insert: Counter,
    #[serde(deserialize_with = "lenient_counter")]
    update: Counter,
    #[serde(deserialize_with = "lenient_counter")]
    remove: Counter,
    #[serde(deserialize_with = "lenient_counter")]
    commands: Counter,
}

impl From<RawNamespace> for NamespaceStats {
    fn from(raw: RawNamespace) -> Self {
        let mut stats = NamespaceStats::new();
        stats.set(EventKind::Total, raw.total);
        stats.set(EventKind::ReadLock, raw.read_lock);
        stats.set(EventKind::WriteLock, raw.write_lock);
        stats.set(EventKind::Queries, raw.queries);
        stats.set(EventKind::Getmore, raw.getmore);
        stats.set(EventKind::Insert, raw.insert);
        stats.set(EventKind::Update, raw.update);
        stats.set(EventKind::Remove, raw.remove);
        stats.set(EventKind::Commands, raw.commands);
        stats
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawCounter {
    time: Option<Number>,
    count: Option<Number>,
}

fn number_to_i64(n: Option<Number>) -> i64 {
    match n {
        Some(Number::Int(v)) => v,
        Some(Number::Float(v)) => v as i64,
        None => 0,
    }
}

fn lenient_counter<'de, D: Deserializer<'de>>(d: D) -> Result<Counter, D::Error> {
    let raw = RawCounter::deserialize(d)?;
    Ok(Counter::new(number_to_i64(raw.time), number_to_i64(raw.count)))
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(match Number::deserialize(d)? {
        Number::Int(v) => v as f64,
        Number::Float(v) => v,
    })
}

/// Converts a raw `top` reply into a [`Snapshot`].
///
/// Fails with [`CollectError::NotOk`] when `ok` is not 1 and with
/// [`CollectError::Decode`] when `totals` is missing or malformed.
pub fn decode_top_reply(reply: Document) -> Result<Snapshot, CollectError> {
    let rendered = reply.to_string();
    let parsed: TopReply =
        bson::from_document(reply).map_err(|e| CollectError::Decode(e.to_string()))?;

    if parsed.ok != 1.0 {
        return Err(CollectError::NotOk(rendered));
    }

    let Some(totals) = parsed.totals else {
        return Err(CollectError::Decode("reply has no 'totals' field".to_string()));
    };

    let mut namespaces = BTreeMap::new();
    for (namespace, value) in totals {
        let Bson::Document(doc) = value else {
            trace!(%namespace, "skipping non-document entry in totals");
            continue;
        };
        let raw: RawNamespace = bson::from_document(doc)
            .map_err(|e| CollectError::Decode(format!("namespace '{}': {}", namespace, e)))?;
        namespaces.insert(namespace, NamespaceStats::from(raw));
    }

    Ok(Snapshot::new(namespaces, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_decode_full_reply() {
        let reply = doc! {
            "totals": {
                "note": "all times in microseconds",
                "db.c": {
                    "total": { "time": 1500_i64, "count": 12_i64 },
                    "readLock": { "time": 700_i64, "count": 8_i64 },
                    "writeLock": { "time": 800_i64, "count": 4_i64 },
                    "queries": { "time": 300_i64, "count": 5_i64 },
                    "getmore": { "time": 0_i64, "count": 0_i64 },
                    "insert": { "time": 400_i64, "count": 4_i64 },
                    "update": { "time": 0_i64, "count": 0_i64 },
                    "remove": { "time": 0_i64, "count": 0_i64 },
                    "commands": { "time": 100_i64, "count": 3_i64 },
                },
            },
            "ok": 1.0,
        };

        let snap = decode_top_reply(reply).unwrap();
        assert!(snap.ok);
        assert_eq!(snap.len(), 1);
        let stats = snap.get("db.c").unwrap();
        assert_eq!(stats.get(EventKind::Total), Counter::new(1500, 12));
        assert_eq!(stats.get(EventKind::ReadLock), Counter::new(700, 8));
        assert_eq!(stats.get(EventKind::WriteLock), Counter::new(800, 4));
        assert_eq!(stats.get(EventKind::Insert), Counter::new(400, 4));
        assert_eq!(stats.get(EventKind::Commands), Counter::new(100, 3));
    }

    #[test]
    fn test_missing_events_default_to_zero() {
        let reply = doc! {
            "totals": { "db.c": { "insert": { "time": 5_i32, "count": 2_i32 } } },
            "ok": 1_i32,
        };
        let snap = decode_top_reply(reply).unwrap();
        let stats = snap.get("db.c").unwrap();
        assert_eq!(stats.get(EventKind::Insert), Counter::new(5, 2));
        for kind in EventKind::ALL.into_iter().filter(|k| *k != EventKind::Insert) {
            assert_eq!(stats.get(kind), Counter::default(), "{kind}");
        }
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let reply = doc! {
            "totals": {
                "db.c": {
                    "total": { "time": 1_i64, "count": 1_i64, "extra": "x" },
                    "latency": { "time": 9_i64, "count": 9_i64 },
                },
            },
            "note": "top-level note",
            "operationTime": 42_i64,
            "ok": 1.0,
        };
        let snap = decode_top_reply(reply).unwrap();
        assert_eq!(snap.get("db.c").unwrap().get(EventKind::Total), Counter::new(1, 1));
    }

    #[test]
    fn test_double_counters() {
        let reply = doc! {
            "totals": { "db.c": { "total": { "time": 2500.0, "count": 3.0 } } },
            "ok": 1.0,
        };
        let snap = decode_top_reply(reply).unwrap();
        assert_eq!(snap.get("db.c").unwrap().get(EventKind::Total), Counter::new(2500, 3));
    }

    #[test]
    fn test_ok_zero_is_rejected() {
        let reply = doc! { "ok": 0.0, "errmsg": "unauthorized" };
        let err = decode_top_reply(reply).unwrap_err();
        assert!(matches!(err, CollectError::NotOk(ref msg) if msg.contains("unauthorized")));
    }

    #[test]
    fn test_missing_totals_is_decode_error() {
        let err = decode_top_reply(doc! { "ok": 1 }).unwrap_err();
        assert!(matches!(err, CollectError::Decode(_)));
    }

    #[test]
    fn test_malformed_counter_is_decode_error() {
        let reply = doc! {
            "totals": { "db.c": { "total": { "time": "soon", "count": 1_i64 } } },
            "ok": 1,
        };
        let err = decode_top_reply(reply).unwrap_err();
        assert!(matches!(err, CollectError::Decode(ref msg) if msg.contains("db.c")));
    }
}
