//! Import a loadout from a RON file.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use console::style;
use loadout_core::{Loadout, LoadoutRecord};

use super::Context;

/// Import a loadout from a RON file
#[derive(Parser)]
pub struct Import {
    /// RON file containing a loadout record
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Replace an existing loadout with the same label
    #[arg(short, long)]
    force: bool,
}

impl Import {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let record: LoadoutRecord = ron::from_str(&text)
            .with_context(|| format!("Failed to parse loadout RON: {}", self.file.display()))?;

        if ctx.repo.exists(&record.label) && !self.force {
            anyhow::bail!(
                "A loadout named `{}` already exists (use --force to replace it)",
                record.label
            );
        }

        // Restoring drops entries that do not resolve against the content.
        let mut manager = ctx.manager();
        let loadout = Loadout::from_record(&record, &ctx.content.load_context(), manager.ids_mut());
        let normalized = loadout.to_record();
        let dropped = count_selectors(&record) - count_selectors(&normalized);
        if dropped > 0 {
            println!(
                "{} {} selector(s) did not match the current content and were dropped",
                style("warning:").yellow().bold(),
                dropped
            );
        }

        let path = ctx.repo.save(&normalized)?;
        println!(
            "{} {} ({})",
            style("Imported").green(),
            normalized.label,
            style(path.display()).dim()
        );
        Ok(())
    }
}

fn count_selectors(record: &LoadoutRecord) -> usize {
    record
        .groups
        .iter()
        .chain(&record.blacklist)
        .map(|g| g.selectors.len())
        .sum()
}
