//! `ssh-agent-echo sync` — write key files and the config fragment.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use keyecho_sync::{sync, IncludeOutcome, RegenerateOutcome, SyncOptions, SyncReport};

use crate::commands::GlobalArgs;

/// Arguments for `ssh-agent-echo sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Regenerate even if the agent's keys have not changed.
    #[arg(long)]
    pub force: bool,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let paths = global.paths()?;
        let mut agent = global.agent();
        let options = SyncOptions {
            force: self.force,
            dry_run: self.dry_run,
        };

        let report = sync(&paths, &mut agent, options).context("sync failed")?;
        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if let Some(reason) = &report.agent_error {
        eprintln!("{} {reason}; syncing as if the agent were empty", "warning:".yellow().bold());
    }

    match &report.regenerate {
        RegenerateOutcome::Skipped => {
            println!("{prefix}{} no changes ({} identities)", "✓".green(), report.identities);
        }
        RegenerateOutcome::WouldRegenerate => {
            println!("{prefix}~ would regenerate config for {} identities", report.identities);
        }
        RegenerateOutcome::Regenerated {
            fragment,
            key_files,
        } => {
            println!(
                "{prefix}{} synced {} identities",
                "✓".green(),
                report.identities
            );
            println!("  ✎  {}", fragment.display());
            for path in key_files {
                println!("  ✎  {}", path.display());
            }
        }
    }

    match report.include {
        IncludeOutcome::Present => {}
        IncludeOutcome::Added => println!("{prefix}{} added Include to base config", "✓".green()),
        IncludeOutcome::WouldAdd => println!("{prefix}~ would add Include to base config"),
    }

    println!("  fingerprint {}", report.fingerprint.as_str().bright_black());
}
