//! Sync orchestration shared by every front end.
//!
//! ```text
//! ACQUIRE → FINGERPRINT_CHECK → {SKIP | REGENERATE} → ENSURE_INCLUDE
//! ```
//!
//! Agent failures never abort: they are logged and the run continues with an
//! empty snapshot, which clears the generated config. Filesystem failures
//! during REGENERATE or ENSURE_INCLUDE propagate.

use std::path::PathBuf;

use keyecho_core::{Fingerprint, IdentitySnapshot, KeySource, SourceError, SshPaths};
use keyecho_renderer::Renderer;

use crate::error::SyncError;
use crate::include::{ensure_include, IncludeOutcome};
use crate::{marker, writer};

/// Knobs for a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Regenerate even when the stored fingerprint matches.
    pub force: bool,
    /// Decide everything, write nothing.
    pub dry_run: bool,
}

/// What happened to the fragment and key directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenerateOutcome {
    /// Stored fingerprint matched; nothing was touched.
    Skipped,
    /// Key directory and fragment were rewritten.
    Regenerated {
        fragment: PathBuf,
        key_files: Vec<PathBuf>,
    },
    /// `--dry-run` mode: regeneration *would* have happened.
    WouldRegenerate,
}

/// Summary of one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Identities that survived parsing.
    pub identities: usize,
    pub fingerprint: Fingerprint,
    /// Fingerprint found in the existing fragment, if any.
    pub previous: Option<Fingerprint>,
    pub regenerate: RegenerateOutcome,
    pub include: IncludeOutcome,
    /// Set when the agent could not be queried and the run used an empty
    /// snapshot instead.
    pub agent_error: Option<String>,
}

/// Query the agent and parse its keys. No filesystem access.
pub fn list_identities(source: &mut dyn KeySource) -> Result<IdentitySnapshot, SourceError> {
    let keys = source.list_keys()?;
    let snapshot = IdentitySnapshot::from_keys(&keys);
    tracing::debug!(
        reported = keys.len(),
        kept = snapshot.len(),
        "parsed agent identities"
    );
    Ok(snapshot)
}

/// ACQUIRE: a failed query becomes an empty snapshot plus the reason.
pub(crate) fn acquire(source: &mut dyn KeySource) -> (IdentitySnapshot, Option<String>) {
    match list_identities(source) {
        Ok(snapshot) => (snapshot, None),
        Err(err) => {
            tracing::warn!(error = %err, "could not query ssh-agent; treating it as empty");
            (IdentitySnapshot::empty(), Some(err.to_string()))
        }
    }
}

/// FINGERPRINT_CHECK: only an unforced run with a matching stored
/// fingerprint may skip.
fn needs_regenerate(force: bool, previous: Option<&Fingerprint>, current: &Fingerprint) -> bool {
    force || previous != Some(current)
}

/// Bring the key directory, fragment and base config in line with the agent.
pub fn sync(
    paths: &SshPaths,
    source: &mut dyn KeySource,
    options: SyncOptions,
) -> Result<SyncReport, SyncError> {
    let (snapshot, agent_error) = acquire(source);
    let fingerprint = snapshot.fingerprint();
    let previous = marker::read_stored(&paths.fragment_path)?;

    let regenerate = if !needs_regenerate(options.force, previous.as_ref(), &fingerprint) {
        tracing::info!(fingerprint = %fingerprint, "no changes detected, skipping regeneration");
        RegenerateOutcome::Skipped
    } else if options.dry_run {
        tracing::info!("[dry-run] would regenerate {}", paths.fragment_path.display());
        RegenerateOutcome::WouldRegenerate
    } else {
        let rendered = Renderer::new()?.render(&snapshot, &fingerprint, paths)?;
        let key_files = writer::regenerate(paths, &rendered)?;
        RegenerateOutcome::Regenerated {
            fragment: paths.fragment_path.clone(),
            key_files,
        }
    };

    let include = ensure_include(paths, options.dry_run)?;

    Ok(SyncReport {
        identities: snapshot.len(),
        fingerprint,
        previous,
        regenerate,
        include,
        agent_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyecho_core::AgentKey;

    struct DownAgent;

    impl KeySource for DownAgent {
        fn list_keys(&mut self) -> Result<Vec<AgentKey>, SourceError> {
            Err(SourceError::SocketNotSet)
        }
    }

    #[test]
    fn skip_only_when_unforced_and_matching() {
        let fp = Fingerprint::from("AAAA");
        let other = Fingerprint::from("BBBB");

        assert!(!needs_regenerate(false, Some(&fp), &fp));
        assert!(needs_regenerate(true, Some(&fp), &fp));
        assert!(needs_regenerate(false, None, &fp));
        assert!(needs_regenerate(false, Some(&other), &fp));
    }

    #[test]
    fn failed_acquire_yields_empty_snapshot_and_reason() {
        let (snapshot, err) = acquire(&mut DownAgent);
        assert!(snapshot.is_empty());
        assert!(err.unwrap().contains("SSH_AUTH_SOCK"));
    }

    #[test]
    fn list_identities_propagates_source_errors() {
        assert!(matches!(
            list_identities(&mut DownAgent),
            Err(SourceError::SocketNotSet)
        ));
    }
}
