mod daemon;
mod journal;
mod routes;

use clap::Subcommand;

pub use daemon::{daemon, watch};
pub use journal::journal;
pub use routes::{cleanup, generate, list_routes, push, reconcile, sync};

#[derive(Subcommand)]
pub enum Command {
    /// Generate, push and reconcile every group once
    Sync,
    /// Resolve domains into stored desired routes
    Generate {
        /// Only this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Push stored routes to the router
    Push {
        /// Only this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Remove routes of groups that no longer have domains
    Cleanup,
    /// Backfill stored routes from tagged router routes
    Reconcile,
    /// Show the router's route table
    Routes,
    /// Show recent DNS activity processing results
    Journal {
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },
    /// Follow the DNS query log until interrupted
    Watch,
    /// Periodic sync, DNS watcher and journal retention until interrupted
    Daemon,
}
