//! Parser for fractional-second CLI intervals.
//!
//! Accepts values such as `1`, `0.5` or `2.25` and converts them to a
//! [`Duration`] with millisecond precision (sub-millisecond remainders are
//! truncated).

use std::time::Duration;

/// Error type for interval parsing failures.
#[derive(Debug, Clone)]
pub struct IntervalParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid interval '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for IntervalParseError {}

/// Largest accepted interval, one day. Keeps the millisecond conversion far
/// away from `u64` overflow.
const MAX_INTERVAL_SECS: f64 = 86_400.0;

/// Parse a number of seconds (possibly fractional) into a `Duration`.
///
/// ```
/// use std::time::Duration;
/// use mgotop::util::parse_interval;
///
/// assert_eq!(parse_interval("1.5").unwrap(), Duration::from_millis(1500));
/// assert_eq!(parse_interval("0").unwrap(), Duration::ZERO);
/// ```
pub fn parse_interval(input: &str) -> Result<Duration, IntervalParseError> {
    let trimmed = input.trim();
    let err = |message: &str| IntervalParseError {
        input: input.to_string(),
        message: message.to_string(),
    };

    let secs: f64 = trimmed.parse().map_err(|_| err("not a number"))?;
    if !secs.is_finite() {
        return Err(err("must be finite"));
    }
    if secs < 0.0 {
        return Err(err("must not be negative"));
    }
    if secs > MAX_INTERVAL_SECS {
        return Err(err("must not exceed one day"));
    }

    Ok(Duration::from_millis((secs * 1000.0) as u64))
}
