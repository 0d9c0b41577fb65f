//! mgotop - a `top`-style monitor for MongoDB collections.
//!
//! Periodically samples the server's `top` admin command and renders the
//! busiest namespaces of the last interval as a live, in-place table.
//!
//! - `collector`: `top` acquisition (real session and mocks)
//! - `models`: snapshots, counters, event kinds, deltas
//! - `rates`: snapshot differencing and ordering
//! - `fmt`: banner, header and row formatting
//! - `tui`: frame rendering, input drainer, main loop
//! - `util`: CLI value parsers

pub mod collector;
pub mod fmt;
pub mod models;
pub mod rates;
pub mod tui;
pub mod util;
