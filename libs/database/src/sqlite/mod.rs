//! SQLite connector and utilities
//!
//! Provides pool creation and a health probe for file-backed or in-memory
//! SQLite databases.

mod config;
mod connector;
mod health;

pub use config::{SqliteConfig, IN_MEMORY};
pub use connector::connect_from_config;
pub use health::check_health;

// Re-export sqlx types for convenience
pub use sqlx::SqlitePool;
