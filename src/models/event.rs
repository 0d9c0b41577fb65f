//! The closed set of per-namespace event kinds reported by `top`.

/// One of the nine counter categories tracked per namespace.
///
/// Variant order is the canonical order: it drives iteration, array
/// indexing in [`super::NamespaceStats`] and sort-key prefix matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Total,
    ReadLock,
    WriteLock,
    Queries,
    Getmore,
    Insert,
    Update,
    Remove,
    Commands,
}

impl EventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 9;

    /// All event kinds in canonical order.
    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::Total,
        EventKind::ReadLock,
        EventKind::WriteLock,
        EventKind::Queries,
        EventKind::Getmore,
        EventKind::Insert,
        EventKind::Update,
        EventKind::Remove,
        EventKind::Commands,
    ];

    /// Field name used by the server in the `top` reply.
    pub fn wire_name(self) -> &'static str {
        match self {
            EventKind::Total => "total",
            EventKind::ReadLock => "readLock",
            EventKind::WriteLock => "writeLock",
            EventKind::Queries => "queries",
            EventKind::Getmore => "getmore",
            EventKind::Insert => "insert",
            EventKind::Update => "update",
            EventKind::Remove => "remove",
            EventKind::Commands => "commands",
        }
    }

    /// Short column label used in the rendered table.
    pub fn column_label(self) -> &'static str {
        match self {
            EventKind::Total => "total",
            EventKind::ReadLock => "rlock",
            EventKind::WriteLock => "wlock",
            EventKind::Queries => "query",
            EventKind::Getmore => "getmore",
            EventKind::Insert => "insert",
            EventKind::Update => "update",
            EventKind::Remove => "remove",
            EventKind::Commands => "command",
        }
    }

    /// Position of this kind in [`EventKind::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolve a user-supplied sort key.
    ///
    /// Case-insensitive. Accepted spellings:
    ///
    /// | Event | Aliases |
    /// |-------|---------|
    /// | total | `total`, `totals` |
    /// | readLock | `rlock`, `readlock` |
    /// | writeLock | `wlock`, `writelock` |
    /// | queries | `query`, `queries` |
    /// | getmore | `getmore`, `getmores` |
    /// | insert | `insert`, `inserts` |
    /// | update | `update`, `updates` |
    /// | remove | `remove`, `removes` |
    /// | commands | `command`, `commands` |
    ///
    /// Anything else of three or more characters resolves when its first
    /// four characters (or all of them, if shorter) start an event name,
    /// so `QUER`, `tot` and `writel` work too. Returns `None` otherwise.
    pub fn from_sort_key(key: &str) -> Option<EventKind> {
        let key = key.trim().to_lowercase();

        let alias = match key.as_str() {
            "total" | "totals" => Some(EventKind::Total),
            "rlock" | "readlock" => Some(EventKind::ReadLock),
            "wlock" | "writelock" => Some(EventKind::WriteLock),
            "query" | "queries" => Some(EventKind::Queries),
            "getmore" | "getmores" => Some(EventKind::Getmore),
            "insert" | "inserts" => Some(EventKind::Insert),
            "update" | "updates" => Some(EventKind::Update),
            "remove" | "removes" => Some(EventKind::Remove),
            "command" | "commands" => Some(EventKind::Commands),
            _ => None,
        };
        if alias.is_some() {
            return alias;
        }

        if key.chars().count() < 3 {
            return None;
        }
        let prefix: String = key.chars().take(4).collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.wire_name().to_lowercase().starts_with(&prefix))
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
