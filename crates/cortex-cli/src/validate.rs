//! # Validate Subcommand
//!
//! Checks a candidate configuration against an analyzer definition and
//! prints either the normalized configuration or every error found.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Map;

use cortex_schema::{AnalyzerDefinition, ValidationOutcome};

/// Arguments for the `cortex validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Analyzer definition file (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub definition: PathBuf,

    /// Candidate configuration file (JSON or YAML). Defaults to an empty object.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print errors as a JSON array instead of one per line.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the configuration is valid, 1 when it is rejected.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let definition = AnalyzerDefinition::from_file(&args.definition)
        .context("failed to load analyzer definition")?;

    let candidate = match &args.config {
        Some(path) => crate::load_candidate(path)?,
        None => Map::new(),
    };

    let outcome = definition.validate_configuration(&candidate);
    report(&definition, &outcome, args.json)?;

    Ok(if outcome.is_ok() { 0 } else { 1 })
}

fn report(definition: &AnalyzerDefinition, outcome: &ValidationOutcome, json: bool) -> Result<()> {
    match outcome {
        Ok(config) => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        Err(errors) if json => {
            println!("{}", serde_json::to_string_pretty(errors)?);
        }
        Err(errors) => {
            println!(
                "{}: {} configuration error(s)",
                definition.id(),
                errors.len()
            );
            for e in errors.errors() {
                println!("  FAIL: {e}");
            }
        }
    }
    Ok(())
}
