use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tracing::info;

use super::SqliteConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Open a pool using a [`SqliteConfig`].
///
/// In-memory databases keep their single connection alive for the pool's
/// lifetime so the data is not dropped between statements.
pub async fn connect_from_config(config: &SqliteConfig) -> DatabaseResult<SqlitePool> {
    let options = config.connect_options()?;

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

    if config.is_in_memory() {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        DatabaseError::ConnectionFailed(format!(
            "failed to open SQLite database '{}': {}",
            config.path().display(),
            e
        ))
    })?;

    info!(
        path = %config.path().display(),
        max_connections = config.max_connections,
        "Opened SQLite database"
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.db");
        assert!(!path.exists());

        let pool = connect_from_config(&SqliteConfig::new(&path)).await.unwrap();
        sqlx::query("SELECT 1").execute(&pool).await.unwrap();

        assert!(path.exists());
        pool.close().await;
    }

    #[tokio::test]
    async fn test_in_memory_keeps_state_between_statements() {
        let pool = connect_from_config(&SqliteConfig::in_memory()).await.unwrap();

        sqlx::query("CREATE TABLE probe(v INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO probe(v) VALUES (7)")
            .execute(&pool)
            .await
            .unwrap();

        let (v,): (i64,) = sqlx::query_as("SELECT v FROM probe")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(v, 7);
    }

    #[tokio::test]
    async fn test_connect_fails_for_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let result = connect_from_config(&SqliteConfig::new(dir.path())).await;
        assert!(matches!(result, Err(DatabaseError::ConnectionFailed(_))));
    }
}
