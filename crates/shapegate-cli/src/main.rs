//! # shapegate CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shapegate_cli::describe::{run_describe, DescribeArgs};
use shapegate_cli::list::{run_list, ListArgs};
use shapegate_cli::validate::{run_validate, ValidateArgs};

/// shapegate: derive JSON Schemas from type catalogs and validate payloads.
#[derive(Parser, Debug)]
#[command(name = "shapegate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the types a catalog defines.
    List(ListArgs),

    /// Print the schema derived for a catalog type.
    Describe(DescribeArgs),

    /// Validate a JSON payload against a catalog type.
    Validate(ValidateArgs),
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
        Commands::List(args) => run_list(&args),
        Commands::Describe(args) => run_describe(&args),
        Commands::Validate(args) => run_validate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
