//! [`Identity`] and the ordered [`IdentitySnapshot`].

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::comment::parse_comment;
use crate::fingerprint::Fingerprint;
use crate::source::AgentKey;

/// A key whose comment passed the grammar, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    comment: String,
    user: String,
    host: String,
    alias: Option<String>,
    key_blob_digest: String,
    key_type: String,
}

impl Identity {
    /// Build an identity from already-encoded key material.
    ///
    /// Returns `None` if any field is empty or the comment is rejected by
    /// [`parse_comment`].
    pub fn new(
        comment: impl Into<String>,
        key_type: impl Into<String>,
        key_blob_digest: impl Into<String>,
    ) -> Option<Self> {
        let comment = comment.into();
        let key_type = key_type.into();
        let key_blob_digest = key_blob_digest.into();
        if comment.is_empty() || key_type.is_empty() || key_blob_digest.is_empty() {
            return None;
        }
        let parsed = parse_comment(&comment)?;
        Some(Self {
            comment,
            user: parsed.user,
            host: parsed.host,
            alias: parsed.alias,
            key_blob_digest,
            key_type,
        })
    }

    /// Build an identity from a raw agent key, base64-encoding its blob.
    pub fn from_key(key: &AgentKey) -> Option<Self> {
        if key.blob.is_empty() {
            return None;
        }
        Self::new(key.comment.clone(), key.key_type.clone(), STANDARD.encode(&key.blob))
    }

    /// Comment exactly as the agent reported it.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Base64 of the public key blob.
    pub fn key_blob_digest(&self) -> &str {
        &self.key_blob_digest
    }

    pub fn key_type(&self) -> &str {
        &self.key_type
    }
}

/// `ssh-add -L` shape: `<type> <base64> <comment>`.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key_type, self.key_blob_digest, self.comment)
    }
}

/// The identities from one agent query.
///
/// Order is the agent's enumeration order and is significant: it feeds the
/// fingerprint and decides stanza order in the rendered config. Nothing in
/// this type sorts or deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentitySnapshot {
    identities: Vec<Identity>,
}

impl IdentitySnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keep every key that yields an [`Identity`], preserving agent order.
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a AgentKey>) -> Self {
        let identities = keys.into_iter().filter_map(Identity::from_key).collect();
        Self { identities }
    }

    pub fn from_identities(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Identity> {
        self.identities.iter()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.identities)
    }
}

impl<'a> IntoIterator for &'a IdentitySnapshot {
    type Item = &'a Identity;
    type IntoIter = std::slice::Iter<'a, Identity>;

    fn into_iter(self) -> Self::IntoIter {
        self.identities.iter()
    }
}
