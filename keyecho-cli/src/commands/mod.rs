//! Subcommand implementations.

pub mod diff;
pub mod list;
pub mod paths;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use keyecho_agent::SocketAgent;
use keyecho_core::SshPaths;

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Home directory whose `.ssh` is managed (default: current user's).
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// ssh-agent socket (default: $SSH_AUTH_SOCK).
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn paths(&self) -> Result<SshPaths> {
        match &self.home {
            Some(home) => Ok(SshPaths::at(home)),
            None => SshPaths::discover()
                .context("could not determine home directory; pass --home <DIR>"),
        }
    }

    pub fn agent(&self) -> SocketAgent {
        match &self.socket {
            Some(socket) => SocketAgent::at(socket),
            None => SocketAgent::from_env(),
        }
    }
}
