//! verdoc CLI - Versioned documentation prebuild.
//!
//! Provides commands for:
//! - `prebuild`: Snapshot every version of a docset with the site generator
//! - `build`: Build the site from the current docs directory
//! - `build-versions`: Build one site per version of a docset

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, BuildVersionsArgs, PrebuildArgs};
use output::Output;

/// verdoc - Versioned documentation prebuild.
#[derive(Parser)]
#[command(name = "verdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate all version snapshots of a docset.
    Prebuild(PrebuildArgs),
    /// Build the site with the generator.
    Build(BuildArgs),
    /// Build a separate site for every version of a docset.
    BuildVersions(BuildVersionsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Prebuild(args) => args.common.verbose,
            Self::Build(args) => args.common.verbose,
            Self::BuildVersions(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Prebuild(args) => args.execute(&output),
        Commands::Build(args) => args.execute(&output),
        Commands::BuildVersions(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
