//! Print a saved loadout.

use anyhow::{Context as _, Result};
use clap::Parser;
use console::style;
use loadout_core::{Loadout, SelectorKind, ThingGroupSelector, ThingSelector};

use super::Context;

/// Print a saved loadout
#[derive(Parser)]
pub struct Inspect {
    /// Label of the loadout to inspect
    #[arg(value_name = "NAME")]
    name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Groups, members and weight
    Summary,
    /// The stored record as JSON
    Json,
    /// Pretty-printed debug format of the restored loadout
    Debug,
}

impl Inspect {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let record = ctx.load_record(&self.name)?;

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&record)
                    .context("Failed to serialize loadout to JSON")?;
                println!("{}", json);
            }
            OutputFormat::Summary | OutputFormat::Debug => {
                let mut manager = ctx.manager();
                let id = manager.restore(&record, &ctx.content.load_context());
                let Some(loadout) = manager.get_mut(id) else {
                    anyhow::bail!("Loadout `{}` could not be restored", self.name);
                };
                if matches!(self.format, OutputFormat::Debug) {
                    println!("{:#?}", loadout);
                } else {
                    print_summary(loadout);
                }
            }
        }

        Ok(())
    }
}

fn print_summary(loadout: &mut Loadout) {
    println!("{}", style(format!("=== {} ===", loadout.label())).bold().green());
    println!("Total weight: {:.2} kg", loadout.weight());
    println!();

    println!("{}", style("Wishlist:").bold().yellow());
    if loadout.is_empty() {
        println!("  (empty)");
    }
    for group in loadout.groups() {
        print_group(group);
    }
    println!();

    if !loadout.blacklist().is_empty() {
        println!("{}", style("Blacklist:").bold().yellow());
        for group in loadout.blacklist() {
            print_group(group);
        }
    }
}

fn print_group(group: &ThingGroupSelector) {
    println!(
        "  {} {} x{} ({:.2} kg)",
        style(group.group_id()).dim(),
        style(group.allowed_thing()).bold(),
        group.allowed_stack_count(),
        group.weight()
    );
    for selector in group.selectors() {
        println!("    {} {}", style(selector.id()).dim(), describe(selector));
    }
}

fn describe(selector: &ThingSelector) -> String {
    match selector.kind() {
        SelectorKind::Single(single) => {
            let stuff = single
                .allowed_stuff()
                .map_or_else(|| "any material".to_owned(), ToString::to_string);
            let quality = single.allowed_quality();
            let hit_points = single.allowed_hit_points();
            format!(
                "{} [{}, quality {}..={}, hp {:.0}%..{:.0}%]",
                single.kind(),
                stuff,
                quality.min,
                quality.max,
                hit_points.min * 100.0,
                hit_points.max * 100.0
            )
        }
        SelectorKind::Generic(generic) => format!("{} (generic)", generic.category().label()),
    }
}
