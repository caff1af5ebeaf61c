//! Error types for keyecho-renderer.

use thiserror::Error;

/// All errors that can arise while rendering the fragment.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),
}
