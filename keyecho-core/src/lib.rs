//! keyecho core library — identity parsing, snapshots, fingerprints, paths.
//!
//! Public API surface:
//! - [`comment`] — the `user@host` / `Name <user@host>` comment grammar
//! - [`identity`] — [`Identity`] and the ordered [`IdentitySnapshot`]
//! - [`fingerprint`] — change-detection digest over a snapshot
//! - [`paths`] — [`SshPaths`], the one place filesystem locations are decided
//! - [`source`] — the [`KeySource`] seam implemented by agent transports
//! - [`error`] — [`CoreError`] and [`SourceError`]

pub mod comment;
pub mod error;
pub mod fingerprint;
pub mod identity;
pub mod paths;
pub mod source;

pub use comment::{parse_comment, ParsedComment};
pub use error::{CoreError, SourceError};
pub use fingerprint::{Fingerprint, MARKER_PREFIX};
pub use identity::{Identity, IdentitySnapshot};
pub use paths::SshPaths;
pub use source::{AgentKey, KeySource};
