//! # Id Subcommand

use anyhow::Result;
use clap::Args;

use cortex_core::AnalyzerId;

/// Arguments for the `cortex id` subcommand.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Analyzer name.
    pub name: String,
    /// Analyzer version.
    pub version: String,
}

/// Print the analyzer id derived from name and version.
pub fn run_id(args: &IdArgs) -> Result<u8> {
    let id = AnalyzerId::compute(&args.name, &args.version);
    tracing::debug!(name = %args.name, version = %args.version, %id, "derived analyzer id");
    println!("{id}");
    Ok(0)
}
