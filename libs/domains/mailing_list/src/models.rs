use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// One mailing-list subscriber.
///
/// Serialized with PascalCase keys and `ConfirmedAt` as Unix seconds:
/// `{"Id": 1, "Email": "a@b.c", "ConfirmedAt": 0, "OptOut": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailEntry {
    /// Store-assigned, never reused
    pub id: i64,
    /// Unique key, immutable after creation
    pub email: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub confirmed_at: DateTime<Utc>,
    /// Soft-delete flag
    pub opt_out: bool,
}

/// Request body naming a single address (create, get, delete).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmailAddress {
    #[validate(email(message = "email address is malformed"))]
    pub email: String,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// The address as stored: surrounding whitespace removed.
    pub fn normalized(email: &str) -> Self {
        Self::new(email.trim())
    }

    /// Normalize, then require a well-formed address.
    pub fn parse(email: &str) -> Result<Self, ValidationErrors> {
        let address = Self::normalized(email);
        address.validate()?;
        Ok(address)
    }
}

/// Update payload. Any `Id` sent by a client is ignored; rows are matched by
/// email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UpsertEmail {
    pub email: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub confirmed_at: DateTime<Utc>,
    pub opt_out: bool,
}

/// One page of active entries, 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchQueryParams {
    pub page: i64,
    pub count: i64,
}

impl BatchQueryParams {
    pub fn new(page: i64, count: i64) -> Self {
        Self { page, count }
    }

    pub fn is_valid(&self) -> bool {
        self.page > 0 && self.count > 0
    }

    /// Rows to skip: `(page - 1) * count`, saturating instead of overflowing.
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.count.max(0))
    }
}
