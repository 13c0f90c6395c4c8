use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{EmailError, EmailResult};
use crate::models::{BatchQueryParams, EmailEntry, UpsertEmail};

/// Repository trait for mailing-list persistence
///
/// Every operation is a single statement against the `emails` table; there are
/// no multi-step transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// Create the backing table if it does not exist yet
    async fn ensure_schema(&self) -> EmailResult<()>;

    /// Insert a fresh entry (confirmed_at = 0, opt_out = false).
    /// A duplicate address is a `Conflict` and leaves the existing row alone.
    async fn create(&self, email: &str) -> EmailResult<()>;

    /// Fetch an entry by address; `None` when absent
    async fn get(&self, email: &str) -> EmailResult<Option<EmailEntry>>;

    /// Insert or overwrite confirmed_at/opt_out for the address
    async fn update(&self, input: UpsertEmail) -> EmailResult<()>;

    /// Set opt_out on the address; succeeds when nothing matches
    async fn soft_delete(&self, email: &str) -> EmailResult<()>;

    /// Active entries (opt_out = false) ordered by ascending id
    async fn list_batch(&self, params: BatchQueryParams) -> EmailResult<Vec<EmailEntry>>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i64,
    entries: BTreeMap<String, EmailEntry>,
}

impl InMemoryState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of EmailRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmailRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryEmailRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmailRepository for InMemoryEmailRepository {
    async fn ensure_schema(&self) -> EmailResult<()> {
        Ok(())
    }

    async fn create(&self, email: &str) -> EmailResult<()> {
        let mut state = self.state.write().await;

        if state.entries.contains_key(email) {
            return Err(EmailError::Conflict(format!(
                "email '{}' already exists",
                email
            )));
        }

        let id = state.allocate_id();
        state.entries.insert(
            email.to_string(),
            EmailEntry {
                id,
                email: email.to_string(),
                confirmed_at: DateTime::<Utc>::default(), // Unix epoch
                opt_out: false,
            },
        );

        tracing::debug!(id, email, "Created entry");
        Ok(())
    }

    async fn get(&self, email: &str) -> EmailResult<Option<EmailEntry>> {
        let state = self.state.read().await;
        Ok(state.entries.get(email).cloned())
    }

    async fn update(&self, input: UpsertEmail) -> EmailResult<()> {
        let mut state = self.state.write().await;

        if let Some(entry) = state.entries.get_mut(&input.email) {
            entry.confirmed_at = input.confirmed_at;
            entry.opt_out = input.opt_out;
            return Ok(());
        }

        let id = state.allocate_id();
        state.entries.insert(
            input.email.clone(),
            EmailEntry {
                id,
                email: input.email,
                confirmed_at: input.confirmed_at,
                opt_out: input.opt_out,
            },
        );
        Ok(())
    }

    async fn soft_delete(&self, email: &str) -> EmailResult<()> {
        let mut state = self.state.write().await;
        if let Some(entry) = state.entries.get_mut(email) {
            entry.opt_out = true;
        }
        Ok(())
    }

    async fn list_batch(&self, params: BatchQueryParams) -> EmailResult<Vec<EmailEntry>> {
        let state = self.state.read().await;

        let mut active: Vec<&EmailEntry> = state.entries.values().filter(|e| !e.opt_out).collect();
        active.sort_by_key(|e| e.id);

        let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
        let count = usize::try_from(params.count).unwrap_or(0);

        Ok(active
            .into_iter()
            .skip(offset)
            .take(count)
            .cloned()
            .collect())
    }
}
