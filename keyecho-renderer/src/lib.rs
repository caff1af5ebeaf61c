//! # keyecho-renderer
//!
//! Turns an [`IdentitySnapshot`](keyecho_core::IdentitySnapshot) into the
//! text of the generated SSH config fragment plus one public-key file per
//! identity. Pure: nothing here touches the filesystem.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keyecho_core::{IdentitySnapshot, SshPaths};
//! use keyecho_renderer::Renderer;
//!
//! fn preview(snapshot: &IdentitySnapshot, paths: &SshPaths) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(out) = renderer.render(snapshot, &snapshot.fingerprint(), paths) {
//!             print!("{}", out.fragment);
//!             for key in &out.key_files {
//!                 println!("{}: {}", key.path.display(), key.content);
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod key_file;

pub use context::FragmentContext;
pub use engine::{KeyFile, RenderedConfig, Renderer};
pub use error::RenderError;
pub use key_file::{key_file_content, key_file_name};
