//! Mailing-list proto ↔ domain conversions
//!
//! - `EmailEntry` ↔ `rpc::mailinglist::EmailEntry`
//! - `GetEmailBatchRequest` → `BatchQueryParams`
//! - Optional entries → `EmailResponse`
//!
//! Timestamp helpers are re-exported from grpc_client::conversions.

use rpc::mailinglist::{self as proto, EmailResponse, GetEmailBatchRequest, GetEmailBatchResponse};

use crate::models::{BatchQueryParams, EmailEntry, UpsertEmail};

pub use grpc_client::conversions::*;

// ============================================================================
// Entry Conversions
// ============================================================================

impl From<EmailEntry> for proto::EmailEntry {
    fn from(entry: EmailEntry) -> Self {
        proto::EmailEntry {
            id: entry.id,
            email: entry.email,
            confirmed_at: datetime_to_timestamp(entry.confirmed_at),
            opt_out: entry.opt_out,
        }
    }
}

impl TryFrom<proto::EmailEntry> for EmailEntry {
    type Error = String;

    fn try_from(entry: proto::EmailEntry) -> Result<Self, Self::Error> {
        Ok(EmailEntry {
            id: entry.id,
            email: entry.email,
            confirmed_at: timestamp_to_datetime(entry.confirmed_at)?,
            opt_out: entry.opt_out,
        })
    }
}

/// The proto `id` is ignored; rows are matched by email.
impl TryFrom<proto::EmailEntry> for UpsertEmail {
    type Error = String;

    fn try_from(entry: proto::EmailEntry) -> Result<Self, Self::Error> {
        Ok(UpsertEmail {
            email: entry.email,
            confirmed_at: timestamp_to_datetime(entry.confirmed_at)?,
            opt_out: entry.opt_out,
        })
    }
}

// ============================================================================
// Request / Response Conversions
// ============================================================================

impl From<GetEmailBatchRequest> for BatchQueryParams {
    fn from(req: GetEmailBatchRequest) -> Self {
        BatchQueryParams::new(i64::from(req.page), i64::from(req.count))
    }
}

pub fn email_response(entry: Option<EmailEntry>) -> EmailResponse {
    EmailResponse {
        email_entry: entry.map(Into::into),
    }
}

pub fn batch_response(entries: Vec<EmailEntry>) -> GetEmailBatchResponse {
    GetEmailBatchResponse {
        email_entries: entries.into_iter().map(Into::into).collect(),
    }
}
