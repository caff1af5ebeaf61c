//! Error types for keyecho-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving the local SSH layout.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `dirs::home_dir()` returned `None` — cannot locate `~/.ssh/`.
    #[error("cannot determine home directory; set $HOME")]
    HomeNotFound,
}

/// Failure to enumerate keys from an agent.
///
/// Never fatal for a sync run: the orchestrator logs it and carries on with
/// an empty snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No agent socket was configured.
    #[error("SSH_AUTH_SOCK is not set; no agent to query")]
    SocketNotSet,

    /// The agent socket exists in configuration but could not be reached.
    #[error("cannot reach ssh-agent at {socket}: {reason}")]
    Unreachable { socket: PathBuf, reason: String },

    /// The agent answered with something we could not decode.
    #[error("ssh-agent protocol error: {0}")]
    Protocol(String),
}
