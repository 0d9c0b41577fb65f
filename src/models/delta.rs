//! Per-interval differences between two snapshots.

use super::EventKind;

/// Which half of each counter a delta is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Event counts.
    #[default]
    Count,
    /// Work time, converted from microseconds to milliseconds.
    Time,
}

impl DisplayMode {
    pub fn from_time_flag(by_time: bool) -> Self {
        if by_time { Self::Time } else { Self::Count }
    }

    /// Unit label shown in the banner.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Count => "event count",
            Self::Time => "time(ms)",
        }
    }
}

/// Activity of one namespace over one interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub namespace: String,
    /// Indexed by [`EventKind::index`].
    pub values: [i64; EventKind::COUNT],
    /// Value of the selected sort event, or 0 when none is selected.
    pub sort_key: i64,
}

impl Delta {
    #[inline]
    pub fn value(&self, kind: EventKind) -> i64 {
        self.values[kind.index()]
    }
}
