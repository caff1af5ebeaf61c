//! # keyecho-sync
//!
//! Fingerprint-gated regeneration of the agent-derived SSH config.
//!
//! Call [`sync`] to bring `~/.ssh` in line with the agent, [`list_identities`]
//! to look without touching anything, or [`diff_fragment`] to preview what a
//! forced sync would change.

pub mod diff;
pub mod error;
pub mod include;
pub mod marker;
pub mod pipeline;
pub mod writer;

pub use diff::{diff_fragment, DiffResult, FileDiff};
pub use error::SyncError;
pub use include::IncludeOutcome;
pub use pipeline::{list_identities, sync, RegenerateOutcome, SyncOptions, SyncReport};
