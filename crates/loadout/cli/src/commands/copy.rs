//! Duplicate a saved loadout under a new label.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::Context;

/// Duplicate a saved loadout under a new label
#[derive(Parser)]
pub struct CopyLoadout {
    /// Label of the loadout to copy
    #[arg(value_name = "NAME")]
    name: String,

    /// Label for the copy
    #[arg(value_name = "NEW_LABEL")]
    new_label: String,
}

impl CopyLoadout {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        if ctx.repo.exists(&self.new_label) {
            anyhow::bail!("A loadout named `{}` already exists", self.new_label);
        }

        let record = ctx.load_record(&self.name)?;
        let mut manager = ctx.manager();
        let source = manager.restore(&record, &ctx.content.load_context());
        let copy = manager.copy(source)?;
        let Some(loadout) = manager.get_mut(copy) else {
            anyhow::bail!("Copy of `{}` vanished", self.name);
        };
        loadout.set_label(self.new_label.as_str());

        let path = ctx.repo.save(&loadout.to_record())?;
        println!(
            "{} {} -> {} ({})",
            style("Copied").green(),
            self.name,
            self.new_label,
            style(path.display()).dim()
        );
        Ok(())
    }
}
