use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::common::{DatabaseError, DatabaseResult};

#[cfg(feature = "config")]
use core_config::{env_or_default, env_parse_or_default, ConfigError, FromEnv};

/// Path understood as a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// SQLite database configuration
///
/// # Example
///
/// ```ignore
/// use database::sqlite::SqliteConfig;
///
/// let config = SqliteConfig::new("list.db");
/// let config = SqliteConfig::from_env()?; // requires `config` feature
/// ```
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    /// Database file path, or `:memory:`
    pub path: PathBuf,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// How long a statement waits on a locked database before failing
    pub busy_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
}

impl SqliteConfig {
    /// Create a config for a file-backed database with default pool settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Private in-memory database.
    ///
    /// Every pooled connection would otherwise see its own empty database, so
    /// the pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
            ..Self::default()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == Path::new(IN_MEMORY)
    }

    /// Build sqlx connect options. File databases are created when missing
    /// and run in WAL mode so readers do not block the writer.
    pub fn connect_options(&self) -> DatabaseResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DatabaseError::ConfigError(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        Ok(options.busy_timeout(Duration::from_secs(self.busy_timeout_secs)))
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("list.db"),
            max_connections: 5,
            busy_timeout_secs: 5,
            acquire_timeout_secs: 8,
        }
    }
}

/// Load SqliteConfig from environment variables
///
/// - `MAILINGLIST_DB` (optional, default: `list.db`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 5)
/// - `DB_BUSY_TIMEOUT_SECS` (optional, default: 5)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let path = PathBuf::from(env_or_default("MAILINGLIST_DB", "list.db"));
        let max_connections: u32 = env_parse_or_default("DB_MAX_CONNECTIONS", "5")?;
        let busy_timeout_secs: u64 = env_parse_or_default("DB_BUSY_TIMEOUT_SECS", "5")?;

        if max_connections == 0 {
            return Err(ConfigError::ParseError {
                key: "DB_MAX_CONNECTIONS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            path,
            max_connections,
            busy_timeout_secs,
            ..Self::default()
        })
    }
}
