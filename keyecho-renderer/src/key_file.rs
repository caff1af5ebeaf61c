//! Per-identity public key files.
//!
//! Name: `<label>_<digest12>.pub`. The label is the alias, or `user@host`
//! when there is none, with anything outside `[A-Za-z0-9._@-]` turned into
//! `_`. `digest12` is the first 12 hex chars of SHA-256 over the base64 blob,
//! so two different keys never share a file.

use keyecho_core::Identity;
use sha2::{Digest, Sha256};

const DIGEST_CHARS: usize = 12;

/// Deterministic file name for `identity` inside the key directory.
pub fn key_file_name(identity: &Identity) -> String {
    let label = match identity.alias() {
        Some(alias) => alias.to_owned(),
        None => format!("{}@{}", identity.user(), identity.host()),
    };
    let digest = hex::encode(Sha256::digest(identity.key_blob_digest().as_bytes()));
    format!("{}_{}.pub", sanitize(&label), &digest[..DIGEST_CHARS])
}

/// `<keyType> <keyBlobDigest> <comment>`, no trailing newline.
pub fn key_file_content(identity: &Identity) -> String {
    identity.to_string()
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '_' | '@' | '-' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(comment: &str, blob: &str) -> Identity {
        Identity::new(comment, "ssh-ed25519", blob).expect("valid identity")
    }

    #[test]
    fn plain_identity_uses_user_at_host() {
        let name = key_file_name(&id("alice@example.com", "AAAA"));
        assert!(name.starts_with("alice@example.com_"), "got {name}");
        assert!(name.ends_with(".pub"));
        assert_eq!(name.len(), "alice@example.com_".len() + DIGEST_CHARS + ".pub".len());
    }

    #[test]
    fn alias_wins_and_is_sanitized() {
        let name = key_file_name(&id("ops/prod box <root@db1>", "AAAA"));
        assert!(name.starts_with("ops_prod_box_"), "got {name}");
        assert!(!name.contains('/'));
    }

    #[test]
    fn different_blobs_same_comment_differ() {
        let a = key_file_name(&id("alice@example.com", "AAAA"));
        let b = key_file_name(&id("alice@example.com", "BBBB"));
        assert_ne!(a, b);
    }

    #[test]
    fn content_is_type_blob_comment() {
        let content = key_file_content(&id("Work Box <bob@10.0.0.5>", "AAAA"));
        assert_eq!(content, "ssh-ed25519 AAAA Work Box <bob@10.0.0.5>");
    }
}
