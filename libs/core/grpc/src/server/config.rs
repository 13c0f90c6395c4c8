//! Server configuration loaded from environment variables.

use core_config::server::BindAddress;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};
use std::net::SocketAddr;

/// Configuration for gRPC server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listener address (default: `:8081`, all interfaces)
    pub addr: BindAddress,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    /// Maximum message size for decoding (default: 4MB)
    pub max_decoding_message_size: usize,
    /// Maximum message size for encoding (default: 4MB)
    pub max_encoding_message_size: usize,
}

const DEFAULT_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: BindAddress::new(SocketAddr::from(([0, 0, 0, 0], 8081))),
            enable_compression: true,
            max_decoding_message_size: DEFAULT_MESSAGE_SIZE,
            max_encoding_message_size: DEFAULT_MESSAGE_SIZE,
        }
    }
}

/// Reads:
/// - `MAILINGLIST_BIND_GRPC` (default: `:8081`)
/// - `GRPC_COMPRESSION` (default: true; `false` or `0` disables)
/// - `GRPC_MAX_MESSAGE_SIZE` (default: 4194304 / 4MB)
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let addr = BindAddress::from_env_or("MAILINGLIST_BIND_GRPC", ":8081")?;
        let compression = env_or_default("GRPC_COMPRESSION", "true");
        let enable_compression = compression != "false" && compression != "0";
        let max_message_size: usize =
            env_parse_or_default("GRPC_MAX_MESSAGE_SIZE", &DEFAULT_MESSAGE_SIZE.to_string())?;

        Ok(Self {
            addr,
            enable_compression,
            max_decoding_message_size: max_message_size,
            max_encoding_message_size: max_message_size,
        })
    }
}

impl ServerConfig {
    pub fn new(addr: impl Into<BindAddress>) -> Self {
        Self {
            addr: addr.into(),
            ..Self::default()
        }
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        self.addr.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 8081);
        assert!(config.enable_compression);
    }

    #[test]
    fn test_new_keeps_defaults() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 9000)));

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert!(config.enable_compression);
        assert_eq!(config.max_decoding_message_size, DEFAULT_MESSAGE_SIZE);
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("MAILINGLIST_BIND_GRPC", Some(":9191")),
                ("GRPC_COMPRESSION", Some("false")),
                ("GRPC_MAX_MESSAGE_SIZE", None),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.addr.port(), 9191);
                assert!(!config.enable_compression);
                assert_eq!(config.max_encoding_message_size, DEFAULT_MESSAGE_SIZE);
            },
        );
    }

    #[test]
    fn test_from_env_bad_address() {
        temp_env::with_var("MAILINGLIST_BIND_GRPC", Some("not an address"), || {
            assert!(ServerConfig::from_env().is_err());
        });
    }
}
