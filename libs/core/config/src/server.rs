use crate::{env_or_default, ConfigError};
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

/// Listener address for a server.
///
/// Accepts everything `SocketAddr` parses, `host:port` names that resolve,
/// and the `:PORT` shorthand which binds all IPv4 interfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindAddress(SocketAddr);

impl BindAddress {
    pub fn new(addr: SocketAddr) -> Self {
        Self(addr)
    }

    /// Read the address from `key`, falling back to `default` when unset.
    pub fn from_env_or(key: &str, default: &str) -> Result<Self, ConfigError> {
        env_or_default(key, default)
            .parse()
            .map_err(|details| ConfigError::ParseError {
                key: key.to_string(),
                details,
            })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }

    pub fn port(&self) -> u16 {
        self.0.port()
    }
}

impl FromStr for BindAddress {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let normalized = match raw.strip_prefix(':') {
            Some(port) => format!("{}:{}", Ipv4Addr::UNSPECIFIED, port),
            None => raw.to_string(),
        };

        if let Ok(addr) = normalized.parse::<SocketAddr>() {
            return Ok(Self(addr));
        }

        normalized
            .to_socket_addrs()
            .map_err(|e| format!("invalid bind address '{}': {}", raw, e))?
            .next()
            .map(Self)
            .ok_or_else(|| format!("bind address '{}' did not resolve", raw))
    }
}

impl fmt::Display for BindAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SocketAddr> for BindAddress {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_shorthand_binds_all_interfaces() {
        let addr: BindAddress = ":8080".parse().unwrap();
        assert_eq!(addr.socket_addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_full_socket_addr() {
        let addr: BindAddress = "127.0.0.1:9000".parse().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9000");

        let addr: BindAddress = "[::1]:50051".parse().unwrap();
        assert_eq!(addr.port(), 50051);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(":http".parse::<BindAddress>().is_err());
        assert!(":70000".parse::<BindAddress>().is_err());
    }

    #[test]
    fn test_from_env_or_default() {
        temp_env::with_var_unset("MAILINGLIST_BIND_TEST", || {
            let addr = BindAddress::from_env_or("MAILINGLIST_BIND_TEST", ":8081").unwrap();
            assert_eq!(addr.port(), 8081);
        });
    }

    #[test]
    fn test_from_env_or_parse_error_names_key() {
        temp_env::with_var("MAILINGLIST_BIND_TEST", Some("nonsense"), || {
            let err = BindAddress::from_env_or("MAILINGLIST_BIND_TEST", ":8081").unwrap_err();
            assert!(err.to_string().contains("MAILINGLIST_BIND_TEST"));
        });
    }
}
