//! The seam between the core and whatever enumerates an agent's keys.

use crate::error::SourceError;

/// One key as reported by an agent: raw public blob, algorithm name, comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentKey {
    pub blob: Vec<u8>,
    pub key_type: String,
    pub comment: String,
}

impl AgentKey {
    pub fn new(blob: impl Into<Vec<u8>>, key_type: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            blob: blob.into(),
            key_type: key_type.into(),
            comment: comment.into(),
        }
    }
}

/// Anything that can list the public keys held by an agent, in agent order.
pub trait KeySource {
    fn list_keys(&mut self) -> Result<Vec<AgentKey>, SourceError>;
}

impl KeySource for Vec<AgentKey> {
    fn list_keys(&mut self) -> Result<Vec<AgentKey>, SourceError> {
        Ok(self.clone())
    }
}
