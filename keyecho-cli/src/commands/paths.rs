//! `ssh-agent-echo paths` — show the resolved file layout.

use anyhow::Result;
use clap::Args;

use crate::commands::GlobalArgs;

/// Arguments for `ssh-agent-echo paths`.
#[derive(Args, Debug)]
pub struct PathsArgs {}

impl PathsArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let paths = global.paths()?;
        let agent = global.agent();

        println!("Home directory:     {}", paths.home.display());
        println!("SSH directory:      {}", paths.ssh_dir.display());
        println!("Base config:        {}", paths.base_config_path.display());
        println!("Config fragment:    {}", paths.fragment_path.display());
        println!("Key directory:      {}", paths.key_dir.display());
        println!("Include directive:  {}", paths.include_directive());
        match agent.socket() {
            Some(socket) => println!("Agent socket:       {}", socket.display()),
            None => println!("Agent socket:       (not set)"),
        }
        Ok(())
    }
}
