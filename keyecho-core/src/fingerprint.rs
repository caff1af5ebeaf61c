//! Change-detection digest over an ordered snapshot.
//!
//! SHA-256 over each identity's comment then base64 blob, in order, with no
//! separators. Rendered as 64 uppercase hex characters. This only decides
//! whether to regenerate; it is not a security boundary.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::identity::Identity;

/// First-line marker of a rendered fragment.
pub const MARKER_PREFIX: &str = "### SSH_AGENT_SYNC_CRC=";

/// Hex digest identifying a snapshot's content and order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    /// Digest the identities in the order given.
    pub fn of(identities: &[Identity]) -> Self {
        let mut hasher = Sha256::new();
        for id in identities {
            hasher.update(id.comment().as_bytes());
            hasher.update(id.key_blob_digest().as_bytes());
        }
        Self(hex::encode_upper(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `### SSH_AGENT_SYNC_CRC=<hex>`
    pub fn marker_line(&self) -> String {
        format!("{MARKER_PREFIX}{}", self.0)
    }

    /// Recover a fingerprint from a marker line; `None` if `line` is not one.
    pub fn from_marker_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(MARKER_PREFIX)?.trim();
        if rest.is_empty() {
            return None;
        }
        Some(Self(rest.to_owned()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
