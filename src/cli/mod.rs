//! Command-line interface for extconfig
//!
//! Provides `apply`, `reset` and `list` subcommands over the configuration
//! store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod apply;
mod list;
mod reset;
mod utils;

/// Merge external configuration sources into a persisted key-value store
#[derive(Parser)]
#[command(name = "extconfig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply configuration documents and environment variables to the store
    Apply(apply::ApplyArgs),

    /// Delete every stored configuration key
    Reset(reset::ResetArgs),

    /// Print all stored keys and values
    List(list::ListArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Apply(args) => apply::run(args),
        Commands::Reset(args) => reset::run(args),
        Commands::List(args) => list::run(args),
    }
}
