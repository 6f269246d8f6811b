//! Delete a saved loadout.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::Context;

/// Delete a saved loadout
#[derive(Parser)]
pub struct Remove {
    /// Label of the loadout to delete
    #[arg(value_name = "NAME")]
    name: String,
}

impl Remove {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        if !ctx.repo.delete(&self.name)? {
            anyhow::bail!("Loadout `{}` not found", self.name);
        }
        println!("{} {}", style("Removed").green(), self.name);
        Ok(())
    }
}
