//! ssh-agent-echo — mirror ssh-agent identities into `~/.ssh/config`.
//!
//! # Usage
//!
//! ```text
//! ssh-agent-echo list [--raw | --json]
//! ssh-agent-echo sync [--force] [--dry-run]
//! ssh-agent-echo diff
//! ssh-agent-echo paths
//! ```
//!
//! Global flags: `--home <dir>` replaces the home directory, `--socket <path>`
//! replaces `SSH_AUTH_SOCK`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    diff::DiffArgs, list::ListArgs, paths::PathsArgs, sync::SyncArgs, GlobalArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ssh-agent-echo",
    version,
    about = "Sync ssh-agent public keys into your SSH client config",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the identities the agent holds, like `ssh-add -L`.
    List(ListArgs),

    /// Write key files and the config fragment, then ensure it is included.
    Sync(SyncArgs),

    /// Show unified diff of what sync would write to the fragment.
    Diff(DiffArgs),

    /// Show the files ssh-agent-echo reads and writes.
    Paths(PathsArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => args.run(&cli.global),
        Commands::Sync(args) => args.run(&cli.global),
        Commands::Diff(args) => args.run(&cli.global),
        Commands::Paths(args) => args.run(&cli.global),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
