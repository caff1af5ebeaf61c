//! Keep the base `~/.ssh/config` pointing at the generated fragment.
//!
//! The only edit ever made to the base file is prepending
//! `Include <fragment>` and a blank line. Everything already in the file is
//! kept byte for byte.

use std::io::ErrorKind;
use std::path::Path;

use keyecho_core::SshPaths;

use crate::error::{io_err, SyncError};
use crate::writer::atomic_write;

/// What [`ensure_include`] found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeOutcome {
    /// The directive was already on its own line.
    Present,
    /// The directive was prepended.
    Added,
    /// `--dry-run`: the directive *would* have been prepended.
    WouldAdd,
}

/// Read the base config, `None` if it does not exist.
fn read_base(path: &Path) -> Result<Option<Vec<u8>>, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

fn has_directive(content: &[u8], directive: &str) -> bool {
    String::from_utf8_lossy(content)
        .lines()
        .any(|line| line.trim() == directive)
}

/// Make sure the base config includes the fragment, prepending the directive
/// when it is missing. Creates the base config if needed.
pub fn ensure_include(paths: &SshPaths, dry_run: bool) -> Result<IncludeOutcome, SyncError> {
    let directive = paths.include_directive();
    let base = &paths.base_config_path;
    let existing = read_base(base)?;

    if let Some(content) = &existing {
        if has_directive(content, &directive) {
            tracing::debug!(path = %base.display(), "include directive already present");
            return Ok(IncludeOutcome::Present);
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would add include directive to {}", base.display());
        return Ok(IncludeOutcome::WouldAdd);
    }

    let mut content = format!("{directive}\n\n").into_bytes();
    content.extend_from_slice(existing.as_deref().unwrap_or_default());
    atomic_write(base, &content)?;
    tracing::info!(path = %base.display(), "added include directive");
    Ok(IncludeOutcome::Added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_base_config_is_created() {
        let home = TempDir::new().unwrap();
        let paths = SshPaths::at(home.path());

        assert_eq!(ensure_include(&paths, false).unwrap(), IncludeOutcome::Added);
        assert_eq!(
            fs::read_to_string(&paths.base_config_path).unwrap(),
            format!("{}\n\n", paths.include_directive())
        );
    }

    #[test]
    fn directive_is_prepended_to_existing_content() {
        let home = TempDir::new().unwrap();
        let paths = SshPaths::at(home.path());
        fs::create_dir_all(&paths.ssh_dir).unwrap();
        fs::write(&paths.base_config_path, "Host work\n    User me\n").unwrap();

        ensure_include(&paths, false).unwrap();
        assert_eq!(
            fs::read_to_string(&paths.base_config_path).unwrap(),
            format!("{}\n\nHost work\n    User me\n", paths.include_directive())
        );
    }

    #[test]
    fn indented_directive_counts_as_present() {
        let home = TempDir::new().unwrap();
        let paths = SshPaths::at(home.path());
        fs::create_dir_all(&paths.ssh_dir).unwrap();
        let original = format!("Host a\n  {}  \n", paths.include_directive());
        fs::write(&paths.base_config_path, &original).unwrap();

        assert_eq!(ensure_include(&paths, false).unwrap(), IncludeOutcome::Present);
        assert_eq!(fs::read_to_string(&paths.base_config_path).unwrap(), original);
    }

    #[test]
    fn directive_inside_a_longer_line_does_not_count() {
        let home = TempDir::new().unwrap();
        let paths = SshPaths::at(home.path());
        fs::create_dir_all(&paths.ssh_dir).unwrap();
        let commented = format!("# {}\n", paths.include_directive());
        fs::write(&paths.base_config_path, &commented).unwrap();

        assert_eq!(ensure_include(&paths, false).unwrap(), IncludeOutcome::Added);
    }

    #[test]
    fn dry_run_does_not_write() {
        let home = TempDir::new().unwrap();
        let paths = SshPaths::at(home.path());

        assert_eq!(ensure_include(&paths, true).unwrap(), IncludeOutcome::WouldAdd);
        assert!(!paths.base_config_path.exists(), "dry-run must not create files");
    }
}
