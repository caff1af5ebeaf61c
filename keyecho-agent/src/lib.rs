//! # keyecho-agent
//!
//! [`KeySource`] backed by a running ssh-agent, reached through the socket
//! in `SSH_AUTH_SOCK` (or an explicit path).

pub mod wire;

use std::env;
use std::path::{Path, PathBuf};

use keyecho_core::{AgentKey, KeySource, SourceError};

/// Environment variable naming the agent socket.
pub const AUTH_SOCK_ENV: &str = "SSH_AUTH_SOCK";

/// Agent reached over a Unix socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketAgent {
    socket: Option<PathBuf>,
}

impl SocketAgent {
    /// Agent at an explicit socket path.
    pub fn at(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: Some(socket.into()),
        }
    }

    /// Agent named by `SSH_AUTH_SOCK`. A missing or empty variable is only
    /// reported when keys are requested.
    pub fn from_env() -> Self {
        let socket = env::var_os(AUTH_SOCK_ENV)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Self { socket }
    }

    pub fn socket(&self) -> Option<&Path> {
        self.socket.as_deref()
    }
}

impl KeySource for SocketAgent {
    fn list_keys(&mut self) -> Result<Vec<AgentKey>, SourceError> {
        let socket = self.socket.as_deref().ok_or(SourceError::SocketNotSet)?;
        tracing::debug!(socket = %socket.display(), "querying ssh-agent");

        let body = exchange(socket)?;
        let keys = wire::parse_identities_answer(&body)?;
        tracing::debug!(count = keys.len(), "ssh-agent listed identities");
        Ok(keys)
    }
}

/// Send the identities request and return the reply body.
#[cfg(unix)]
fn exchange(socket: &Path) -> Result<Vec<u8>, SourceError> {
    use std::io::{Read, Write};
    use std::os::unix::net::UnixStream;

    let unreachable = |e: std::io::Error| SourceError::Unreachable {
        socket: socket.to_path_buf(),
        reason: e.to_string(),
    };
    let io_protocol = |e: std::io::Error| SourceError::Protocol(e.to_string());

    let mut stream = UnixStream::connect(socket).map_err(unreachable)?;
    stream
        .write_all(&wire::request_identities())
        .map_err(io_protocol)?;

    let mut len = [0u8; 4];
    stream.read_exact(&mut len).map_err(io_protocol)?;
    let len = u32::from_be_bytes(len) as usize;
    if len == 0 || len > wire::MAX_MESSAGE_LEN {
        return Err(SourceError::Protocol(format!("agent reply length {len} out of range")));
    }

    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).map_err(io_protocol)?;
    Ok(body)
}

#[cfg(not(unix))]
fn exchange(socket: &Path) -> Result<Vec<u8>, SourceError> {
    Err(SourceError::Unreachable {
        socket: socket.to_path_buf(),
        reason: "unix-socket agents are not supported on this platform".into(),
    })
}
