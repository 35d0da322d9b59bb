//! # Validate Subcommand
//!
//! Checks a JSON payload against a catalog type and prints the verdict:
//!
//! ```text
//! OK
//! FAIL: materials[0].material: "material" is a required property
//! ```
//!
//! A violation at the payload root is printed with the path `(root)`.
//! The payload is read from a file, or from stdin when the path is `-`.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use shapegate_schema::{ValidationFailure, Validator};

use crate::describe::derive_schema;
use crate::load_catalog;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Type catalog file (YAML, or JSON when the extension is `.json`).
    #[arg(long)]
    pub catalog: PathBuf,

    /// Name of the type to validate against.
    pub type_name: String,

    /// JSON payload file, or `-` for stdin.
    pub payload: PathBuf,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let catalog = load_catalog(&args.catalog)?;
    let schema = derive_schema(&catalog, &args.type_name)
        .with_context(|| format!("cannot derive schema for {}", args.type_name))?;
    let validator = Validator::compile(schema)?;
    let payload = read_payload(&args.payload)?;

    let verdict = validator.check(&payload);
    println!("{}", render_verdict(&verdict));
    Ok(if verdict.is_ok() { 0 } else { 1 })
}

/// Read and parse a JSON payload.
pub fn read_payload(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload {}", path.display()))?
    };
    serde_json::from_str(&text)
        .with_context(|| format!("payload {} is not valid JSON", path.display()))
}

/// Render a validation verdict as one line.
pub fn render_verdict(verdict: &Result<(), ValidationFailure>) -> String {
    match verdict {
        Ok(()) => "OK".to_string(),
        Err(failure) if failure.path.is_root() => format!("FAIL: (root): {}", failure.message),
        Err(failure) => format!("FAIL: {}: {}", failure.path, failure.message),
    }
}
