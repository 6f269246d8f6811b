//! List saved loadouts.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::Context;

/// List saved loadouts
#[derive(Parser)]
pub struct List;

impl List {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let records = ctx.repo.list()?;
        if records.is_empty() {
            println!(
                "No loadouts saved in {}",
                style(ctx.repo.base_dir().display()).dim()
            );
            return Ok(());
        }

        let mut manager = ctx.manager();
        for record in &records {
            let id = manager.restore(record, &ctx.content.load_context());
            let Some(loadout) = manager.get_mut(id) else {
                continue;
            };
            println!(
                "{:<24} {:>3} groups {:>3} blacklisted {:>8.2} kg",
                style(&record.label).bold(),
                loadout.len(),
                loadout.blacklist().len(),
                loadout.weight()
            );
        }

        Ok(())
    }
}
