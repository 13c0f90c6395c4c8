//! Mailing List Client
//!
//! gRPC command-line client. Without a subcommand it runs the demo: create a
//! subscriber, confirm and opt it out, soft-delete it, and list one page.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{MailingListClient, demo, run};
