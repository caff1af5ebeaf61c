//! Tera rendering engine — [`Renderer`] and its output types.
//!
//! # Fragment layout
//!
//! ```text
//! ### SSH_AGENT_SYNC_CRC=<fingerprint>
//!
//! Host *
//!     IdentitiesOnly yes
//!
//! Host <alias>            (only when the comment carried a name)
//!     HostName <host>
//!     User <user>
//!     IdentityFile <key file>
//!     IdentitiesOnly yes
//!
//! Host <host>
//!     User <user>
//!     IdentityFile <key file>
//!     IdentitiesOnly yes
//!
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use tera::Tera;

use keyecho_core::{Fingerprint, IdentitySnapshot, SshPaths};

use crate::context::FragmentContext;
use crate::error::RenderError;
use crate::key_file::key_file_content;

const FRAGMENT_TEMPLATE: &str = "ssh/fragment.conf";
const FRAGMENT_SOURCE: &str = include_str!("templates/fragment.conf.tera");

/// A public key file to be written into the key directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFile {
    pub file_name: String,
    pub path: PathBuf,
    pub content: String,
}

/// Everything one sync writes: the fragment text and the key files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfig {
    pub fragment: String,
    /// Snapshot order, one per distinct file name.
    pub key_files: Vec<KeyFile>,
}

/// Tera-based renderer for the config fragment.
///
/// Uses the embedded template only. Create once with [`Renderer::new`] and reuse.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(FRAGMENT_TEMPLATE, FRAGMENT_SOURCE)?;
        Ok(Renderer { tera })
    }

    /// Render the fragment and key files for `snapshot`.
    ///
    /// `fingerprint` is written verbatim into the marker line; callers pass
    /// the snapshot's own fingerprint.
    pub fn render(
        &self,
        snapshot: &IdentitySnapshot,
        fingerprint: &Fingerprint,
        paths: &SshPaths,
    ) -> Result<RenderedConfig, RenderError> {
        let ctx = FragmentContext::build(snapshot, fingerprint, paths);
        let fragment = self.tera.render(FRAGMENT_TEMPLATE, &ctx.to_tera_context()?)?;

        let mut seen = HashSet::new();
        let mut key_files = Vec::with_capacity(snapshot.len());
        for (identity, entry) in snapshot.iter().zip(&ctx.entries) {
            if !seen.insert(entry.file_name.clone()) {
                continue;
            }
            key_files.push(KeyFile {
                file_name: entry.file_name.clone(),
                path: paths.key_file(&entry.file_name),
                content: key_file_content(identity),
            });
        }

        Ok(RenderedConfig {
            fragment,
            key_files,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
