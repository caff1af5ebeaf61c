//! Dry-run unified diff support for `ssh-agent-echo diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use keyecho_core::{KeySource, SshPaths};
use keyecho_renderer::Renderer;

use crate::error::{io_err, SyncError};
use crate::pipeline::acquire;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff of the fragment against what a forced sync would write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// `None` when the on-disk fragment already matches.
    pub fragment: Option<FileDiff>,
    /// Set when the agent could not be queried.
    pub agent_error: Option<String>,
}

/// Render the fragment for the agent's current keys and compare it to the
/// one on disk.
///
/// No files are written.
pub fn diff_fragment(paths: &SshPaths, source: &mut dyn KeySource) -> Result<DiffResult, SyncError> {
    let (snapshot, agent_error) = acquire(source);
    let rendered = Renderer::new()?.render(&snapshot, &snapshot.fingerprint(), paths)?;

    let path = &paths.fragment_path;
    let existing = read_existing_or_empty(path)?;
    let fragment = if existing == rendered.fragment {
        None
    } else {
        let old_header = format!("a/{}", path.display());
        let new_header = format!("b/{}", path.display());
        let unified_diff = TextDiff::from_lines(&existing, &rendered.fragment)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();
        Some(FileDiff {
            path: path.clone(),
            unified_diff,
        })
    };

    Ok(DiffResult {
        fragment,
        agent_error,
    })
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content.replace("\r\n", "\n")),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use keyecho_core::AgentKey;
    use tempfile::TempDir;

    use crate::{sync, SyncOptions};

    use super::*;

    fn agent() -> Vec<AgentKey> {
        vec![AgentKey::new(b"alice-key".to_vec(), "ssh-ed25519", "alice@example.com")]
    }

    #[test]
    fn no_diff_after_clean_sync() {
        let home = TempDir::new().expect("home");
        let paths = SshPaths::at(home.path());
        sync(&paths, &mut agent(), SyncOptions::default()).expect("sync");

        let diff = diff_fragment(&paths, &mut agent()).expect("diff");
        assert!(diff.fragment.is_none(), "synced fragment should have no diff");
        assert!(diff.agent_error.is_none());
    }

    #[test]
    fn new_key_produces_unified_diff() {
        let home = TempDir::new().expect("home");
        let paths = SshPaths::at(home.path());
        sync(&paths, &mut agent(), SyncOptions::default()).expect("sync");

        let mut more = agent();
        more.push(AgentKey::new(b"bob-key".to_vec(), "ssh-ed25519", "Work Box <bob@10.0.0.5>"));
        let diff = diff_fragment(&paths, &mut more).expect("diff");

        let file = diff.fragment.expect("fragment diff");
        assert!(file.unified_diff.contains("@@"));
        assert!(file.unified_diff.contains("+Host Work_Box"));
        assert!(file.unified_diff.contains("-### SSH_AGENT_SYNC_CRC="));
    }

    #[test]
    fn diff_never_writes() {
        let home = TempDir::new().expect("home");
        let paths = SshPaths::at(home.path());
        let diff = diff_fragment(&paths, &mut agent()).expect("diff");

        assert!(diff.fragment.is_some());
        assert!(!paths.ssh_dir.exists(), "diff must not create files");
    }
}
