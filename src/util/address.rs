//! Server address resolution from the `--host` / `--port` pair.
//!
//! `--host` may carry its own port (`db1:27018`), in which case it is used
//! unless `--port` is given explicitly. Bracketed IPv6 literals
//! (`[::1]:27017`) are understood; a bare IPv6 literal is taken as a host
//! without a port.

/// Port used when neither `--port` nor the host string names one.
pub const DEFAULT_PORT: u16 = 27017;

/// Error type for address resolution failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParseError(pub String);

impl std::fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid server address: {}", self.0)
    }
}

impl std::error::Error for AddressParseError {}

/// Resolve the `(host, port)` pair to connect to.
pub fn server_address(host: &str, port: Option<&str>) -> Result<(String, u16), AddressParseError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(AddressParseError("empty host".to_string()));
    }

    let (bare_host, embedded_port) = split_host(host)?;
    if bare_host.is_empty() {
        return Err(AddressParseError(format!("no host name in '{}'", host)));
    }

    let port = match (port, embedded_port) {
        (Some(p), _) => parse_port(p)?,
        (None, Some(p)) => parse_port(p)?,
        (None, None) => DEFAULT_PORT,
    };

    Ok((bare_host.to_string(), port))
}

fn split_host(host: &str) -> Result<(&str, Option<&str>), AddressParseError> {
    if let Some(rest) = host.strip_prefix('[') {
        let Some((inner, tail)) = rest.split_once(']') else {
            return Err(AddressParseError(format!("unterminated '[' in '{}'", host)));
        };
        return match tail.strip_prefix(':') {
            Some(p) => Ok((inner, Some(p))),
            None if tail.is_empty() => Ok((inner, None)),
            None => Err(AddressParseError(format!("unexpected '{}' after ']'", tail))),
        };
    }

    // More than one colon: bare IPv6 literal.
    if host.matches(':').count() > 1 {
        return Ok((host, None));
    }

    match host.split_once(':') {
        Some((h, p)) => Ok((h, Some(p))),
        None => Ok((host, None)),
    }
}

fn parse_port(port: &str) -> Result<u16, AddressParseError> {
    match port.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(AddressParseError(format!("bad port '{}'", port))),
        Ok(p) => Ok(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            server_address("127.0.0.1", None).unwrap(),
            ("127.0.0.1".to_string(), 27017)
        );
    }

    #[test]
    fn test_explicit_port() {
        assert_eq!(
            server_address("db1", Some("27018")).unwrap(),
            ("db1".to_string(), 27018)
        );
    }

    #[test]
    fn test_embedded_port() {
        assert_eq!(
            server_address("db1:27019", None).unwrap(),
            ("db1".to_string(), 27019)
        );
    }

    #[test]
    fn test_explicit_port_wins_over_embedded() {
        assert_eq!(
            server_address("db1:27019", Some("27020")).unwrap(),
            ("db1".to_string(), 27020)
        );
    }

    #[test]
    fn test_ipv6() {
        assert_eq!(
            server_address("[::1]:27018", None).unwrap(),
            ("::1".to_string(), 27018)
        );
        assert_eq!(server_address("[::1]", None).unwrap(), ("::1".to_string(), 27017));
        assert_eq!(server_address("fe80::1", None).unwrap(), ("fe80::1".to_string(), 27017));
    }

    #[test]
    fn test_bad_input() {
        assert!(server_address("", None).is_err());
        assert!(server_address(":27017", None).is_err());
        assert!(server_address("db1", Some("0")).is_err());
        assert!(server_address("db1", Some("mongo")).is_err());
        assert!(server_address("db1:99999", None).is_err());
        assert!(server_address("[::1", None).is_err());
    }
}
