//! Utility modules for mgotop.

mod address;
mod interval;

pub use address::{AddressParseError, DEFAULT_PORT, server_address};
pub use interval::{IntervalParseError, parse_interval};
