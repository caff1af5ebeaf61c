//! Read back the fingerprint stamped into the last rendered fragment.

use std::io::ErrorKind;
use std::path::Path;

use keyecho_core::{Fingerprint, MARKER_PREFIX};

use crate::error::{io_err, SyncError};

/// Fingerprint from the first marker line of the fragment at `fragment_path`.
///
/// `None` means no prior run: the file is missing, has no marker line, or
/// the first marker line is blank after the prefix.
pub fn read_stored(fragment_path: &Path) -> Result<Option<Fingerprint>, SyncError> {
    let bytes = match std::fs::read(fragment_path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_err(fragment_path, err)),
    };
    let text = String::from_utf8_lossy(&bytes);
    let stored = text
        .lines()
        .find(|line| line.starts_with(MARKER_PREFIX))
        .and_then(Fingerprint::from_marker_line);
    match &stored {
        Some(fp) => tracing::debug!(fingerprint = %fp, "found stored fingerprint"),
        None => tracing::debug!(path = %fragment_path.display(), "no stored fingerprint"),
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_fragment_means_no_prior_run() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_stored(&tmp.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn first_marker_line_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fragment");
        fs::write(
            &path,
            "# hand note\n### SSH_AGENT_SYNC_CRC=AAA\n### SSH_AGENT_SYNC_CRC=BBB\n",
        )
        .unwrap();
        assert_eq!(read_stored(&path).unwrap(), Some(Fingerprint::from("AAA")));
    }

    #[test]
    fn crlf_fragment_is_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fragment");
        fs::write(&path, "### SSH_AGENT_SYNC_CRC=ABCDEF\r\n\r\nHost *\r\n").unwrap();
        assert_eq!(read_stored(&path).unwrap(), Some(Fingerprint::from("ABCDEF")));
    }

    #[test]
    fn fragment_without_marker_means_no_prior_run() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fragment");
        fs::write(&path, "Host *\n    IdentitiesOnly yes\n").unwrap();
        assert_eq!(read_stored(&path).unwrap(), None);
    }
}
