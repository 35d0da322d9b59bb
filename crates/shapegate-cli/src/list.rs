//! # List Subcommand
//!
//! Prints the type names a catalog defines, one per line, sorted.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::load_catalog;

/// Arguments for the list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Type catalog file (YAML, or JSON when the extension is `.json`).
    #[arg(long)]
    pub catalog: PathBuf,
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs) -> Result<u8> {
    let catalog = load_catalog(&args.catalog)?;
    for name in catalog.type_names() {
        println!("{name}");
    }
    Ok(0)
}
