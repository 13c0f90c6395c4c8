use async_trait::async_trait;
use chrono::DateTime;
use database::sqlite::SqlitePool;

use crate::error::{EmailError, EmailResult};
use crate::models::{BatchQueryParams, EmailEntry, UpsertEmail};
use crate::repository::EmailRepository;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS emails (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    email        TEXT UNIQUE,
    confirmed_at INTEGER,
    opt_out      INTEGER
)"#;

#[derive(Debug, sqlx::FromRow)]
struct EmailRow {
    id: i64,
    email: String,
    confirmed_at: i64,
    opt_out: i64,
}

impl TryFrom<EmailRow> for EmailEntry {
    type Error = EmailError;

    fn try_from(row: EmailRow) -> Result<Self, Self::Error> {
        let confirmed_at = DateTime::from_timestamp(row.confirmed_at, 0).ok_or_else(|| {
            EmailError::Store(format!(
                "stored confirmed_at {} for '{}' is out of range",
                row.confirmed_at, row.email
            ))
        })?;

        Ok(EmailEntry {
            id: row.id,
            email: row.email,
            confirmed_at,
            opt_out: row.opt_out != 0,
        })
    }
}

/// SQLite-backed implementation of EmailRepository
#[derive(Clone)]
pub struct SqliteEmailRepository {
    pool: SqlitePool,
}

impl SqliteEmailRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailRepository for SqliteEmailRepository {
    async fn ensure_schema(&self) -> EmailResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("emails table ready");
        Ok(())
    }

    async fn create(&self, email: &str) -> EmailResult<()> {
        let result = sqlx::query("INSERT INTO emails (email, confirmed_at, opt_out) VALUES (?, 0, 0)")
            .bind(email)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                EmailError::Conflict(format!("email '{}' already exists", email)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, email: &str) -> EmailResult<Option<EmailEntry>> {
        let row = sqlx::query_as::<_, EmailRow>(
            "SELECT id, email, confirmed_at, opt_out FROM emails WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EmailEntry::try_from).transpose()
    }

    async fn update(&self, input: UpsertEmail) -> EmailResult<()> {
        sqlx::query(
            r#"INSERT INTO emails (email, confirmed_at, opt_out) VALUES (?, ?, ?)
               ON CONFLICT(email) DO UPDATE SET
                   confirmed_at = excluded.confirmed_at,
                   opt_out = excluded.opt_out"#,
        )
        .bind(&input.email)
        .bind(input.confirmed_at.timestamp())
        .bind(input.opt_out)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn soft_delete(&self, email: &str) -> EmailResult<()> {
        sqlx::query("UPDATE emails SET opt_out = 1 WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_batch(&self, params: BatchQueryParams) -> EmailResult<Vec<EmailEntry>> {
        let rows = sqlx::query_as::<_, EmailRow>(
            r#"SELECT id, email, confirmed_at, opt_out FROM emails
               WHERE opt_out = 0
               ORDER BY id ASC
               LIMIT ? OFFSET ?"#,
        )
        .bind(params.count)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EmailEntry::try_from).collect()
    }
}
