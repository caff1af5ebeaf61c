//! Agent protocol framing for the identities request.
//!
//! Request: `uint32 len | byte SSH_AGENTC_REQUEST_IDENTITIES`.
//! Reply:   `uint32 len | byte SSH_AGENT_IDENTITIES_ANSWER | uint32 nkeys |
//!          nkeys × (string key_blob, string comment)`.
//!
//! Each entry is judged on its own. Certificates, blobs without a readable
//! algorithm name and the like are skipped with a warning; only a reply whose
//! framing is broken fails as a whole.

use ssh_encoding::Decode;

use keyecho_core::{AgentKey, SourceError};

pub const SSH_AGENT_FAILURE: u8 = 5;
pub const SSH_AGENTC_REQUEST_IDENTITIES: u8 = 11;
pub const SSH_AGENT_IDENTITIES_ANSWER: u8 = 12;

/// Largest reply accepted, matching OpenSSH's agent limit.
pub const MAX_MESSAGE_LEN: usize = 256 * 1024;

const CERT_SUFFIX: &str = "-cert-v01@openssh.com";

/// Length-prefixed `SSH_AGENTC_REQUEST_IDENTITIES` message.
pub fn request_identities() -> [u8; 5] {
    [0, 0, 0, 1, SSH_AGENTC_REQUEST_IDENTITIES]
}

fn protocol(e: ssh_encoding::Error) -> SourceError {
    SourceError::Protocol(format!("malformed identities answer: {e}"))
}

/// Decode a reply body (length prefix already stripped) into agent keys.
pub fn parse_identities_answer(mut body: &[u8]) -> Result<Vec<AgentKey>, SourceError> {
    match u8::decode(&mut body).map_err(protocol)? {
        SSH_AGENT_IDENTITIES_ANSWER => {}
        SSH_AGENT_FAILURE => {
            return Err(SourceError::Protocol("agent refused to list identities".into()))
        }
        other => {
            return Err(SourceError::Protocol(format!(
                "unexpected reply type {other} to identities request"
            )))
        }
    }

    let count = u32::decode(&mut body).map_err(protocol)?;
    let mut keys = Vec::new();
    for index in 0..count {
        let blob = Vec::<u8>::decode(&mut body).map_err(protocol)?;
        let comment = Vec::<u8>::decode(&mut body).map_err(protocol)?;
        if let Some(key) = agent_key(index, blob, comment) {
            keys.push(key);
        }
    }
    Ok(keys)
}

fn agent_key(index: u32, blob: Vec<u8>, comment: Vec<u8>) -> Option<AgentKey> {
    let mut reader = blob.as_slice();
    let Ok(key_type) = String::decode(&mut reader) else {
        tracing::warn!(index, "skipping agent key with unreadable algorithm name");
        return None;
    };
    if key_type.is_empty() {
        tracing::warn!(index, "skipping agent key with empty algorithm name");
        return None;
    }
    if key_type.ends_with(CERT_SUFFIX) {
        tracing::debug!(index, key_type = %key_type, "skipping certificate");
        return None;
    }

    let comment = match String::from_utf8(comment) {
        Ok(comment) => comment,
        Err(err) => {
            tracing::warn!(index, "agent key comment is not UTF-8; decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    Some(AgentKey::new(blob, key_type, comment))
}
