//! Template context — serializable rendering payload built from a snapshot.

use serde::Serialize;

use keyecho_core::{Fingerprint, IdentitySnapshot, SshPaths};

use crate::error::RenderError;
use crate::key_file::key_file_name;

/// Everything the fragment template needs.
#[derive(Debug, Clone, Serialize)]
pub struct FragmentContext {
    /// `### SSH_AGENT_SYNC_CRC=<hex>`
    pub marker: String,
    /// One entry per identity, snapshot order.
    pub entries: Vec<EntryCtx>,
}

/// One identity's stanza data.
#[derive(Debug, Clone, Serialize)]
pub struct EntryCtx {
    pub alias: Option<String>,
    pub host: String,
    pub user: String,
    pub identity_file: String,
    /// File name inside the key directory.
    #[serde(skip)]
    pub file_name: String,
}

impl FragmentContext {
    pub fn build(
        snapshot: &IdentitySnapshot,
        fingerprint: &Fingerprint,
        paths: &SshPaths,
    ) -> Self {
        let entries = snapshot
            .iter()
            .map(|id| {
                let file_name = key_file_name(id);
                EntryCtx {
                    alias: id.alias().map(str::to_owned),
                    host: id.host().to_owned(),
                    user: id.user().to_owned(),
                    identity_file: paths.key_file(&file_name).display().to_string(),
                    file_name,
                }
            })
            .collect();
        Self {
            marker: fingerprint.marker_line(),
            entries,
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
