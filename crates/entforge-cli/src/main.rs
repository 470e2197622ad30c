//! Entforge CLI — generate persistence, API and client artifacts from
//! entity definitions.

use clap::{Parser, Subcommand};
use commands::{generate::GenerateCommand, inspect::InspectCommand};

mod commands;

/// Entforge - schema-driven entity code generator
#[derive(Debug, Parser)]
#[command(name = "entforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate artifacts from a directory of entity definitions
    #[command(name = "generate")]
    Generate(GenerateCommand),

    /// Print the resolved entity model without generating anything
    #[command(name = "inspect")]
    Inspect(InspectCommand),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
