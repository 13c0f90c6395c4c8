//! Server infrastructure module.
//!
//! This module provides:
//! - Router layering (request tracing)
//! - Serving with graceful shutdown
//! - Shutdown coordination between servers sharing a process

pub mod app;
pub mod shutdown;

pub use app::{create_router, serve};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
