use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "mailing-list-client")]
#[command(about = "Talk to the mailing list server over gRPC")]
pub struct Cli {
    /// Server address; `:PORT` dials the local host
    #[arg(long, env = "MAILINGLIST_GRPC_ADDR", default_value = ":8081")]
    pub grpc_addr: String,

    /// Deadline for each call, in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The subcommand to run; the demo when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create, update, delete, then list one page (the default)
    Demo {
        #[arg(long, default_value = "pqr@yahoo.in")]
        email: String,
    },

    /// Create a subscriber
    Create { email: String },

    /// Fetch a subscriber
    Get { email: String },

    /// List one page of active subscribers
    Batch {
        #[arg(long, default_value_t = 1)]
        page: i32,

        #[arg(long, default_value_t = 5)]
        count: i32,
    },

    /// Set confirmation time and opt-out for a subscriber
    Update {
        email: String,

        /// Unix seconds
        #[arg(long, default_value_t = 0)]
        confirmed_at: i64,

        #[arg(long)]
        opt_out: bool,
    },

    /// Opt a subscriber out
    Delete { email: String },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Demo {
            email: "pqr@yahoo.in".to_string(),
        }
    }
}
