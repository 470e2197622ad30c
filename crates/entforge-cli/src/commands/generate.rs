//! `entforge generate` subcommand
//!
//! Loads every `*.entity.toml` under the entities directory, prints lint
//! findings as warnings, resolves relationships and writes the configured
//! artifact groups.
//!
//! # Usage
//!
//! ```text
//! entforge generate ./entities                                  # persistence objects only
//! entforge generate ./entities --controllers-out ../server/Api  # + API controllers
//! entforge generate ./entities --web-out ../web/src/generated   # + client artifacts
//! entforge generate ./entities --check                          # validate only (CI)
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use entforge::{
    GenerateConfig, generate_set,
    generate::config::DEFAULT_NAMESPACE,
    resolve,
    schema::{lint::lint, load},
};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Directory containing entity definition documents
    pub entities: PathBuf,

    /// Output directory for generated persistence objects
    #[arg(long, default_value = "server/Model")]
    pub server_out: PathBuf,

    /// Output directory for generated API controllers
    #[arg(long)]
    pub controllers_out: Option<PathBuf>,

    /// Output directory for generated client artifacts
    #[arg(long)]
    pub web_out: Option<PathBuf>,

    /// Namespace for server-side artifacts
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Load, lint and resolve without writing files (exit 0 when clean)
    #[arg(long)]
    pub check: bool,
}

impl GenerateCommand {
    pub fn execute(self) -> Result<()> {
        let set = load::load_dir(&self.entities)
            .with_context(|| format!("loading entity definitions from {}", self.entities.display()))?;

        // Lints are advisory: a typo'd relation target generates nothing on
        // the far side but never fails the run.
        for finding in lint(&set) {
            eprintln!("{} {finding}", "!".yellow());
        }

        let resolution = resolve(&set);

        if self.check {
            println!(
                "{} {} entities, {} reverse association(s), {} override(s) — definitions OK",
                "✓".green(),
                set.len(),
                resolution.reverse_count(),
                resolution.override_count(),
            );
            return Ok(());
        }

        let mut config =
            GenerateConfig::new(&self.entities, &self.server_out).with_namespace(&self.namespace);
        if let Some(dir) = &self.controllers_out {
            config = config.with_controllers(dir);
        }
        if let Some(dir) = &self.web_out {
            config = config.with_web(dir);
        }

        let report = generate_set(&set, &config).context("generation failed")?;

        for artifact in &report.artifacts {
            println!(
                "  {} {} ({})",
                "→".cyan(),
                artifact.path.display(),
                artifact.kind
            );
        }
        println!(
            "{} {} entities, {} artifact(s) written",
            "✓".green(),
            report.entity_count,
            report.artifacts.len()
        );

        Ok(())
    }
}
