//! SQLite test infrastructure
//!
//! Provides a `TestDatabase` helper backed by a file in a fresh temporary
//! directory, so every test gets an isolated database that disappears on drop.

use database::sqlite::{SqliteConfig, SqlitePool, connect_from_config};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test database wrapper that ensures proper cleanup
///
/// The temporary directory (and the database file in it) is removed when this
/// struct is dropped.
pub struct TestDatabase {
    #[allow(dead_code)]
    _dir: TempDir,
    path: PathBuf,
    pub pool: SqlitePool,
}

impl TestDatabase {
    /// Create a new, empty file-backed test database
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.pool() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("list.db");

        let pool = connect_from_config(&SqliteConfig::new(&path))
            .await
            .expect("Failed to open test database");

        tracing::info!(path = %path.display(), "Test database ready (SQLite)");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    /// Get a handle to the connection pool (cheap clone)
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_file_is_created_and_removed() {
        let db = TestDatabase::new().await;
        let path = db.path().to_path_buf();
        assert!(path.exists());

        drop(db);
        assert!(!path.exists());
    }
}
