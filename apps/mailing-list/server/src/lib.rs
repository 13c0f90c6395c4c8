//! Mailing List Server
//!
//! Serves one subscriber list over two transports at once.
//!
//! ## Architecture
//!
//! ```text
//! JSON/HTTP client          gRPC client
//!   ↓ (axum, :8080)           ↓ (tonic + Zstd, :8081)
//! handlers::router          MailingListServiceImpl (service.rs)
//!   └──────────┬──────────────┘
//!              ↓
//!      MailingListService (domain layer, validation)
//!              ↓
//!      SqliteEmailRepository
//!              ↓
//!      SQLite (MAILINGLIST_DB)
//! ```
//!
//! ## Modules
//!
//! - `config`: Environment configuration
//! - `server`: Startup, serving, and shutdown
//! - `service`: gRPC service implementation (MailingListServiceImpl)

pub mod config;
pub mod server;
pub mod service;

// Re-export for convenience
pub use server::{run, serve};
pub use service::MailingListServiceImpl;
