//! `ssh-agent-echo list` — show the identities that would be synced.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use keyecho_core::IdentitySnapshot;
use keyecho_sync::list_identities;

use crate::commands::GlobalArgs;

/// Arguments for `ssh-agent-echo list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print `<type> <key> <comment>` lines, like `ssh-add -L`.
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct IdentityRow {
    #[tabled(rename = "alias")]
    alias: String,
    #[tabled(rename = "user")]
    user: String,
    #[tabled(rename = "host")]
    host: String,
    #[tabled(rename = "type")]
    key_type: String,
    #[tabled(rename = "comment")]
    comment: String,
}

impl ListArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let mut agent = global.agent();
        let snapshot = match list_identities(&mut agent) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                eprintln!("{} {err}", "warning:".yellow().bold());
                IdentitySnapshot::empty()
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            return Ok(());
        }

        if self.raw {
            for identity in &snapshot {
                println!("{identity}");
            }
        } else if !snapshot.is_empty() {
            print_table(&snapshot);
        }
        println!("Total identities: {}", snapshot.len());
        Ok(())
    }
}

fn print_table(snapshot: &IdentitySnapshot) {
    let rows: Vec<IdentityRow> = snapshot
        .iter()
        .map(|id| IdentityRow {
            alias: id.alias().unwrap_or("-").to_string(),
            user: id.user().to_string(),
            host: id.host().to_string(),
            key_type: id.key_type().to_string(),
            comment: id.comment().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
