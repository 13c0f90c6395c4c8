use std::sync::Arc;

use crate::error::{EmailError, EmailResult};
use crate::models::{BatchQueryParams, EmailAddress, EmailEntry, UpsertEmail};
use crate::repository::EmailRepository;

pub const INVALID_BATCH_MESSAGE: &str = "page and count fields are required and must be > 0";

/// Trimmed, well-formed address for operations that may insert a row
fn writable_address(email: &str) -> EmailResult<String> {
    EmailAddress::parse(email)
        .map(|address| address.email)
        .map_err(|e| EmailError::Validation(e.to_string()))
}

/// Trimmed address for lookups; a malformed one simply matches nothing
fn lookup_address(email: &str) -> String {
    EmailAddress::normalized(email).email
}

/// Service layer shared by the HTTP and gRPC front ends
///
/// Owns the validation rules so both transports reject the same inputs.
/// Clones share one repository.
pub struct MailingListService<R: EmailRepository> {
    repository: Arc<R>,
}

impl<R: EmailRepository> Clone for MailingListService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: EmailRepository> MailingListService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create the backing schema; called once at startup
    pub async fn ensure_schema(&self) -> EmailResult<()> {
        self.repository.ensure_schema().await
    }

    /// Create a new subscriber and return it as stored
    pub async fn create_email(&self, email: &str) -> EmailResult<Option<EmailEntry>> {
        let email = writable_address(email)?;

        self.repository.create(&email).await?;
        tracing::info!(email = %email, "Created email entry");

        self.repository.get(&email).await
    }

    /// Fetch a subscriber; `None` when the address is unknown
    pub async fn get_email(&self, email: &str) -> EmailResult<Option<EmailEntry>> {
        self.repository.get(&lookup_address(email)).await
    }

    /// One page of active subscribers, ordered by id
    pub async fn get_email_batch(&self, params: BatchQueryParams) -> EmailResult<Vec<EmailEntry>> {
        if !params.is_valid() {
            return Err(EmailError::Validation(INVALID_BATCH_MESSAGE.to_string()));
        }

        self.repository.list_batch(params).await
    }

    /// Insert or overwrite confirmation state and opt-out for an address
    ///
    /// The address follows the same rules as create since it may insert a row.
    pub async fn update_email(&self, mut input: UpsertEmail) -> EmailResult<Option<EmailEntry>> {
        input.email = writable_address(&input.email)?;

        let email = input.email.clone();
        self.repository.update(input).await?;
        tracing::info!(email = %email, "Updated email entry");

        self.repository.get(&email).await
    }

    /// Soft-delete: mark the address opted out. Unknown addresses succeed with
    /// `None`.
    pub async fn delete_email(&self, email: &str) -> EmailResult<Option<EmailEntry>> {
        let email = lookup_address(email);
        self.repository.soft_delete(&email).await?;
        tracing::info!(email = %email, "Opted out email entry");

        self.repository.get(&email).await
    }
}
