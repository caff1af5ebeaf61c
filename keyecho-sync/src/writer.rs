//! Filesystem side of regeneration.
//!
//! ## `regenerate` — order of operations
//!
//! 1. Remove the key directory, if present, with everything in it.
//! 2. Recreate it empty.
//! 3. Write every rendered key file.
//! 4. Replace the fragment via `atomic_write`.
//!
//! A crash between 3 and 4 leaves fresh key files next to the old fragment;
//! the next run sees a fingerprint mismatch and regenerates again.

use std::path::{Path, PathBuf};

use keyecho_core::SshPaths;
use keyecho_renderer::RenderedConfig;

use crate::error::{io_err, SyncError};

/// Write `content` to `path` through `<path>.keyecho.tmp` and a rename.
///
/// Parent directories are created. An existing file's permissions carry over
/// to the replacement.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> Result<(), SyncError> {
    let tmp = PathBuf::from(format!("{}.keyecho.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &[u8], tmp: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;
    if let Ok(meta) = std::fs::metadata(path) {
        std::fs::set_permissions(tmp, meta.permissions()).map_err(|e| io_err(tmp, e))?;
    }

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

/// Replace the key directory and fragment with `rendered`.
///
/// Returns the key file paths written, in render order.
pub(crate) fn regenerate(
    paths: &SshPaths,
    rendered: &RenderedConfig,
) -> Result<Vec<PathBuf>, SyncError> {
    let key_dir = &paths.key_dir;
    if key_dir.exists() {
        tracing::info!(path = %key_dir.display(), "removing key directory");
        std::fs::remove_dir_all(key_dir).map_err(|e| io_err(key_dir, e))?;
    }
    std::fs::create_dir_all(key_dir).map_err(|e| io_err(key_dir, e))?;

    let mut written = Vec::with_capacity(rendered.key_files.len());
    for key in &rendered.key_files {
        std::fs::write(&key.path, &key.content).map_err(|e| io_err(&key.path, e))?;
        tracing::info!(path = %key.path.display(), "wrote key file");
        written.push(key.path.clone());
    }

    atomic_write(&paths.fragment_path, rendered.fragment.as_bytes())?;
    tracing::info!(path = %paths.fragment_path.display(), "wrote config fragment");
    Ok(written)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use keyecho_renderer::KeyFile;
    use std::fs;
    use tempfile::TempDir;

    fn rendered(paths: &SshPaths, files: &[(&str, &str)]) -> RenderedConfig {
        RenderedConfig {
            fragment: "### SSH_AGENT_SYNC_CRC=ABC\n".to_string(),
            key_files: files
                .iter()
                .map(|(name, content)| KeyFile {
                    file_name: name.to_string(),
                    path: paths.key_file(name),
                    content: content.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn atomic_write_creates_parents_and_cleans_tmp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".ssh").join("config");
        atomic_write(&path, b"data").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "data");
        let tmp_path = PathBuf::from(format!("{}.keyecho.tmp", path.display()));
        assert!(!tmp_path.exists(), ".keyecho.tmp must be cleaned up");
    }

    #[test]
    fn regenerate_drops_stale_key_files() {
        let home = TempDir::new().unwrap();
        let paths = SshPaths::at(home.path());
        fs::create_dir_all(&paths.key_dir).unwrap();
        fs::write(paths.key_file("old.pub"), "ssh-ed25519 OLD gone@host").unwrap();

        let out = rendered(&paths, &[("new.pub", "ssh-ed25519 NEW kept@host")]);
        let written = regenerate(&paths, &out).unwrap();

        assert_eq!(written, vec![paths.key_file("new.pub")]);
        assert!(!paths.key_file("old.pub").exists(), "stale key file must go");
        assert_eq!(
            fs::read_to_string(paths.key_file("new.pub")).unwrap(),
            "ssh-ed25519 NEW kept@host"
        );
        assert_eq!(
            fs::read_to_string(&paths.fragment_path).unwrap(),
            "### SSH_AGENT_SYNC_CRC=ABC\n"
        );
    }

    #[test]
    fn regenerate_with_no_keys_leaves_empty_key_dir() {
        let home = TempDir::new().unwrap();
        let paths = SshPaths::at(home.path());
        regenerate(&paths, &rendered(&paths, &[])).unwrap();

        assert!(paths.key_dir.is_dir());
        assert_eq!(fs::read_dir(&paths.key_dir).unwrap().count(), 0);
    }

    #[test]
    #[cfg(unix)]
    fn atomic_write_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        atomic_write(&path, b"new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn rename_failure_leaves_target_and_cleans_tmp() {
        let root = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let path = root.path().join("config");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep"), "original").unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("config.keyecho.tmp");

        let err = atomic_write_with_tmp(&path, b"new content", &tmp_path)
            .expect_err("rename over a directory should fail");
        assert!(matches!(err, SyncError::Io { .. }));

        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "original");
        assert!(!tmp_path.exists(), ".keyecho.tmp should be cleaned up");
    }
}
