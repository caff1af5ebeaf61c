//! `ssh-agent-echo diff` — show the unified diff for what sync would write.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use keyecho_sync::diff_fragment;

use crate::commands::GlobalArgs;

/// Arguments for `ssh-agent-echo diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let paths = global.paths()?;
        let mut agent = global.agent();

        let result = diff_fragment(&paths, &mut agent).context("diff failed")?;
        if let Some(reason) = &result.agent_error {
            eprintln!("{} {reason}; diffing against an empty agent", "warning:".yellow().bold());
        }

        let Some(diff) = result.fragment else {
            println!("No differences for {}.", paths.fragment_path.display());
            return Ok(());
        };

        print!("{}", diff.unified_diff);
        if !diff.unified_diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
