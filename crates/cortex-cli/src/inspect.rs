//! # Inspect Subcommand
//!
//! Prints an analyzer definition's identity, accepted data types and
//! configuration items.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cortex_schema::{AnalyzerDefinition, FieldDefinition};

/// Arguments for the `cortex inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Analyzer definition file (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub definition: PathBuf,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let definition = AnalyzerDefinition::from_file(&args.definition)
        .context("failed to load analyzer definition")?;

    println!("id:         {}", definition.id());
    println!("name:       {} {}", definition.name, definition.version);
    if let Some(base) = &definition.base_config {
        println!("baseConfig: {base}");
    }
    println!("dataTypes:  {}", definition.data_type_list.join(", "));
    println!("items:");
    for item in &definition.configuration_items {
        println!("  {}", describe_item(item));
    }
    Ok(0)
}

/// One-line summary of a configuration item, e.g.
/// `key: string (required) - API key`.
pub fn describe_item(item: &FieldDefinition) -> String {
    let mut line = format!("{}: {}", item.name, item.field_type);
    if item.is_multi() {
        line.push_str("[]");
    }

    let mut flags = Vec::new();
    if item.is_required() {
        flags.push("required".to_string());
    }
    if let Some(default) = &item.default_value {
        flags.push(format!("default {default}"));
    }
    if !flags.is_empty() {
        line.push_str(&format!(" ({})", flags.join(", ")));
    }

    if !item.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&item.description);
    }
    line
}
