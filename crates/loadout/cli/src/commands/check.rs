//! Compare an inventory against a saved loadout.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use console::style;
use loadout_core::{
    DefOracle, ItemKind, MaterialKind, Quality, RestockPlan, RestockTracker, Thing,
};
use serde::Deserialize;

use super::Context;

/// Compare an inventory against a saved loadout
#[derive(Parser)]
pub struct Check {
    /// Label of the loadout to check against
    #[arg(value_name = "NAME")]
    name: String,

    /// RON file listing the carried things
    #[arg(value_name = "INVENTORY")]
    inventory: PathBuf,
}

/// One carried stack as written in an inventory file.
#[derive(Debug, Deserialize)]
struct InventoryEntry {
    kind: ItemKind,
    #[serde(default)]
    stuff: Option<MaterialKind>,
    #[serde(default)]
    quality: Option<Quality>,
    #[serde(default)]
    condition: Option<f32>,
    #[serde(default = "one")]
    quantity: u32,
}

fn one() -> u32 {
    1
}

impl InventoryEntry {
    fn into_thing(self, defs: &dyn DefOracle) -> Result<Thing> {
        let def = defs
            .item(&self.kind)
            .with_context(|| format!("Unknown item `{}` in inventory", self.kind))?;

        let mut thing = Thing::new(def).with_quantity(self.quantity);
        if let Some(stuff) = self.stuff {
            thing = thing.with_stuff(stuff);
        }
        if let Some(quality) = self.quality {
            thing = thing.with_quality(quality);
        }
        if let Some(condition) = self.condition {
            thing = thing.with_condition(condition);
        }
        Ok(thing)
    }
}

impl Check {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let record = ctx.load_record(&self.name)?;
        let text = std::fs::read_to_string(&self.inventory)
            .with_context(|| format!("Failed to read {}", self.inventory.display()))?;
        let entries: Vec<InventoryEntry> = ron::from_str(&text).with_context(|| {
            format!("Failed to parse inventory RON: {}", self.inventory.display())
        })?;
        let inventory = entries
            .into_iter()
            .map(|entry| entry.into_thing(&ctx.content.defs))
            .collect::<Result<Vec<_>>>()?;

        let mut manager = ctx.manager();
        let id = manager.restore(&record, &ctx.content.load_context());
        let Some(loadout) = manager.get_mut(id) else {
            anyhow::bail!("Loadout `{}` could not be restored", self.name);
        };

        let mut tracker = RestockTracker::new();
        print_plan(&record.label, tracker.plan(loadout, &inventory));
        Ok(())
    }
}

fn print_plan(label: &str, plan: &RestockPlan) {
    println!("{}", style(format!("=== Restock: {} ===", label)).bold().green());
    println!();

    for margin in &plan.groups {
        let status = match margin.margin() {
            0 => style("ok".to_owned()).green(),
            m if m < 0 => style(format!("need {}", margin.missing())).yellow(),
            _ => style(format!("surplus {}", margin.surplus())).cyan(),
        };
        println!(
            "  {:<10} {:<24} {:>4}/{:<4} {}",
            margin.group.to_string(),
            margin.allowed_thing.to_string(),
            margin.held,
            margin.wanted,
            status
        );
    }

    if !plan.to_drop.is_empty() {
        println!();
        println!("{}", style("Blacklisted, drop:").bold().red());
        for thing in &plan.to_drop {
            println!("  {} x{}", thing.kind(), thing.quantity);
        }
    }

    if !plan.unassigned.is_empty() {
        println!();
        println!("{}", style("Not in loadout:").bold().yellow());
        for thing in &plan.unassigned {
            println!("  {} x{}", thing.kind(), thing.quantity);
        }
    }

    println!();
    if plan.is_satisfied() {
        println!("{}", style("Loadout satisfied").green().bold());
    } else {
        println!(
            "{} {} group(s) short",
            style("Loadout not satisfied:").yellow().bold(),
            plan.needs().count()
        );
    }
}
