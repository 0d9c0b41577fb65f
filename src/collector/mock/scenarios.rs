//! Pre-built reply sequences for testing.
//!
//! These scenarios model common server behaviour between consecutive
//! samples: steady load, namespace churn and a restart.

use super::source::MockTop;
use crate::models::EventKind::{Commands, Insert, Queries, ReadLock, Total, Update, WriteLock};

#[allow(dead_code)]
impl MockTop {
    /// Three samples of a server with two busy collections.
    ///
    /// `shop.orders` takes 5 inserts per interval, `shop.users` 7 queries.
    pub fn steady_load() -> Self {
        let mut mock = Self::default();
        for i in 0..3_i64 {
            mock.push(Self::reply(&[
                (
                    "shop.orders",
                    &[
                        (Total, 1_000 + 2_000 * i, 10 + 5 * i),
                        (WriteLock, 800 + 1_500 * i, 10 + 5 * i),
                        (Insert, 500 + 1_000 * i, 10 + 5 * i),
                    ],
                ),
                (
                    "shop.users",
                    &[
                        (Total, 4_000 + 3_000 * i, 20 + 7 * i),
                        (ReadLock, 3_000 + 2_500 * i, 20 + 7 * i),
                        (Queries, 2_000 + 2_000 * i, 20 + 7 * i),
                    ],
                ),
            ]));
        }
        mock
    }

    /// Two samples where `app.old` is dropped and `app.new` appears.
    pub fn namespace_churn() -> Self {
        let mut mock = Self::default();
        mock.push(Self::reply(&[
            ("app.old", &[(Total, 10, 1)]),
            ("app.kept", &[(Total, 10, 1), (Update, 10, 1)]),
        ]));
        mock.push(Self::reply(&[
            ("app.kept", &[(Total, 10, 1), (Update, 10, 1)]),
            ("app.new", &[(Total, 99, 9)]),
        ]));
        mock
    }

    /// Two samples straddling a server restart: counters go backwards.
    pub fn restarted_server() -> Self {
        let mut mock = Self::default();
        mock.push(Self::reply(&[(
            "admin.$cmd",
            &[(Total, 90_000, 900), (Commands, 90_000, 900)],
        )]));
        mock.push(Self::reply(&[(
            "admin.$cmd",
            &[(Total, 1_000, 3), (Commands, 1_000, 3)],
        )]));
        mock
    }
}
