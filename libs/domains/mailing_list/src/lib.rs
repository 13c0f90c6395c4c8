//! Mailing List Domain
//!
//! Subscriber records with create, fetch, paginated listing, upsert, and
//! soft delete (opt-out), served identically over JSON/HTTP and gRPC.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐ ┌─────────────┐
//! │  Handlers   │ │ Conversions │  ← HTTP endpoints / proto mapping for gRPC
//! └──────┬──────┘ └──────┬──────┘
//!        └───────┬───────┘
//! ┌──────────────▼──────────────┐
//! │           Service           │  ← Validation shared by both transports
//! └──────────────┬──────────────┘
//! ┌──────────────▼──────────────┐
//! │         Repository          │  ← EmailRepository trait, SQLite + in-memory
//! └──────────────┬──────────────┘
//! ┌──────────────▼──────────────┐
//! │           Models            │  ← EmailEntry, request DTOs
//! └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_mailing_list::{
//!     handlers,
//!     repository::InMemoryEmailRepository,
//!     service::MailingListService,
//! };
//!
//! let service = MailingListService::new(InMemoryEmailRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod conversions;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sqlite;

// Re-export commonly used types
pub use error::{EmailError, EmailResult};
pub use models::{BatchQueryParams, EmailAddress, EmailEntry, UpsertEmail};
pub use repository::{EmailRepository, InMemoryEmailRepository};
pub use service::MailingListService;
pub use sqlite::SqliteEmailRepository;
