//! # cortex CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cortex_cli::identity::{run_id, IdArgs};
use cortex_cli::inspect::{run_inspect, InspectArgs};
use cortex_cli::validate::{run_validate, ValidateArgs};

/// Cortex analyzer configuration toolkit.
///
/// Validates analyzer configurations against their definitions and derives
/// analyzer identifiers.
#[derive(Parser, Debug)]
#[command(name = "cortex", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a candidate configuration against an analyzer definition.
    Validate(ValidateArgs),

    /// Show an analyzer definition's id, data types and configuration items.
    Inspect(InspectArgs),

    /// Derive the analyzer id for a name and version.
    Id(IdArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Id(args) => run_id(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
