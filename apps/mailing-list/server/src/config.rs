use core_config::server::BindAddress;
use core_config::{ConfigError, Environment, FromEnv};
use database::sqlite::SqliteConfig;
use grpc_client::server::ServerConfig as GrpcConfig;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub database: SqliteConfig,
    /// `MAILINGLIST_BIND_JSON` (default `:8080`)
    pub http: BindAddress,
    pub grpc: GrpcConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            database: SqliteConfig::from_env()?,
            http: BindAddress::from_env_or("MAILINGLIST_BIND_JSON", ":8080")?,
            grpc: GrpcConfig::from_env()?,
        })
    }
}
