//! `entforge inspect` subcommand
//!
//! Prints the resolved working set — entities, effective association
//! identifiers, synthesized reverses — for debugging definition sets.
//! `--json` dumps the same view as machine-readable JSON.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use entforge::{
    Resolution, resolve,
    schema::{lint::lint, load, node::EntityDef, set::EntitySet},
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectCommand {
    /// Directory containing entity definition documents
    pub entities: PathBuf,

    /// Print the resolved model as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    entities: Vec<&'a EntityDef>,
    resolution: &'a Resolution,
}

impl InspectCommand {
    pub fn execute(self) -> Result<()> {
        let set = load::load_dir(&self.entities)
            .with_context(|| format!("loading entity definitions from {}", self.entities.display()))?;
        let resolution = resolve(&set);

        if self.json {
            let output = InspectOutput {
                entities: set.iter().collect(),
                resolution: &resolution,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("serializing model")?
            );
            return Ok(());
        }

        for finding in lint(&set) {
            eprintln!("{} {finding}", "!".yellow());
        }

        print_model(&set, &resolution);

        Ok(())
    }
}

fn print_model(set: &EntitySet, resolution: &Resolution) {
    for entity in set {
        println!("{}", entity.entity.bold());

        if !entity.fields.is_empty() {
            println!("  fields:");
            for field in &entity.fields {
                let mut notes = Vec::new();
                if field.required {
                    notes.push("required");
                }
                if field.readonly {
                    notes.push("readonly");
                }
                if field.is_computed() {
                    notes.push("computed");
                }
                let suffix = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", notes.join(", "))
                };
                println!("    {}: {}{suffix}", field.name, field.ty);
            }
        }

        if !entity.relations.is_empty() {
            println!("  relations:");
            for relation in &entity.relations {
                println!(
                    "    {} -> {} ({}) [{}]",
                    relation.name,
                    relation.target,
                    relation.kind,
                    resolution.association_for(entity, relation)
                );
            }
        }

        let reverses = resolution.reverses_for(&entity.entity);
        if !reverses.is_empty() {
            println!("  reverses:");
            for reverse in reverses {
                let shape = if reverse.collection {
                    "collection"
                } else {
                    "single"
                };
                println!(
                    "    {} <- {} ({shape}) [{}]",
                    reverse.property_name, reverse.source_entity, reverse.association
                );
            }
        }

        println!();
    }
}
