//! Ensemble — monorepo build-and-collect orchestrator.
//!
//! # Usage
//!
//! ```text
//! ensemble build [ROOT] [--output <DIR>] [--skip <NAME>]... [--manifest <FILE>]
//!                [--build-output <DIR>] [--command <CMD>] [--dry-run] [--json] [--strict]
//! ensemble scan [ROOT] [--skip <NAME>]... [--manifest <FILE>] [--build-output <DIR>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{build::BuildArgs, scan::ScanArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ensemble",
    version,
    about = "Build every project in a monorepo and collect the outputs",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the build command in every eligible project, then collect outputs.
    Build(BuildArgs),

    /// List project candidates without building anything.
    Scan(ScanArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => args.run(),
        Commands::Scan(args) => args.run(),
    }
}
