//! # Axum Helpers
//!
//! Server plumbing shared by the HTTP front ends.
//!
//! - **[`server`]**: router layering, serving, and shutdown
//!   coordination across several servers in one process
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{ShutdownCoordinator, create_router, serve};
//! use tokio::net::TcpListener;
//!
//! let coordinator = ShutdownCoordinator::new();
//! let listener = TcpListener::bind("0.0.0.0:8080").await?;
//! serve(create_router(api_routes), listener, coordinator).await?;
//! ```

pub mod server;

pub use server::{ShutdownCoordinator, create_router, serve, shutdown_signal};
