//! Database library providing the SQLite connector used by the mailing list service
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite support via sqlx
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::sqlite::{self, SqliteConfig};
//!
//! let pool = sqlite::connect_from_config(&SqliteConfig::new("list.db")).await?;
//! sqlite::check_health(&pool).await?;
//! ```

pub mod common;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use common::{DatabaseError, DatabaseResult};
