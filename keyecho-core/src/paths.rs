//! Filesystem layout under `~/.ssh`.
//!
//! | Item          | Path                              |
//! |---------------|-----------------------------------|
//! | SSH directory | `~/.ssh`                          |
//! | Fragment      | `~/.ssh/config.ssh_agent_sync`    |
//! | Key files     | `~/.ssh/ssh_agent_sync/`          |
//! | Base config   | `~/.ssh/config`                   |

use std::path::PathBuf;

use crate::error::CoreError;

pub const SSH_DIR_NAME: &str = ".ssh";
pub const FRAGMENT_FILE_NAME: &str = "config.ssh_agent_sync";
pub const KEY_DIR_NAME: &str = "ssh_agent_sync";
pub const BASE_CONFIG_FILE_NAME: &str = "config";

/// Every path the sync touches, resolved once from a home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshPaths {
    pub home: PathBuf,
    pub ssh_dir: PathBuf,
    pub fragment_path: PathBuf,
    pub key_dir: PathBuf,
    pub base_config_path: PathBuf,
}

impl SshPaths {
    /// Layout rooted at `home`.
    pub fn at(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let ssh_dir = home.join(SSH_DIR_NAME);
        Self {
            fragment_path: ssh_dir.join(FRAGMENT_FILE_NAME),
            key_dir: ssh_dir.join(KEY_DIR_NAME),
            base_config_path: ssh_dir.join(BASE_CONFIG_FILE_NAME),
            ssh_dir,
            home,
        }
    }

    /// Layout rooted at the current user's home directory.
    pub fn discover() -> Result<Self, CoreError> {
        dirs::home_dir().map(Self::at).ok_or(CoreError::HomeNotFound)
    }

    /// Line the base config must carry for the fragment to take effect.
    pub fn include_directive(&self) -> String {
        format!("Include {}", self.fragment_path.display())
    }

    /// Absolute path of a key file named `file_name`.
    pub fn key_file(&self, file_name: &str) -> PathBuf {
        self.key_dir.join(file_name)
    }
}
