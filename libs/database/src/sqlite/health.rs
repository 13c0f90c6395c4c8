use sqlx::SqlitePool;
use tracing::debug;

use crate::common::DatabaseError;

/// Check SQLite database health
///
/// Executes `SELECT 1` to verify the pool can hand out a working connection.
pub async fn check_health(pool: &SqlitePool) -> Result<(), DatabaseError> {
    debug!("Running SQLite health check");

    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("SQLite health check failed: {}", e))
    })?;

    debug!("SQLite health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::{connect_from_config, SqliteConfig};

    #[tokio::test]
    async fn test_health_check_on_open_pool() {
        let pool = connect_from_config(&SqliteConfig::in_memory()).await.unwrap();
        assert!(check_health(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn test_health_check_on_closed_pool() {
        let pool = connect_from_config(&SqliteConfig::in_memory()).await.unwrap();
        pool.close().await;
        assert!(matches!(
            check_health(&pool).await,
            Err(DatabaseError::HealthCheckFailed(_))
        ));
    }
}
