//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CatalogCommand, CompletionsCommand, EndpointsCommand, ResolveCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resolving Google Cloud provider configuration.
#[derive(Parser)]
#[command(name = "gprov")]
#[command(
    version,
    about = "Resolve and inspect Google Cloud provider configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Settings file to load instead of searching the default locations
    #[arg(long, value_name = "PATH", global = true, env = "GPROV_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve and print the provider configuration
    Resolve(ResolveCommand),

    /// Validate a settings file
    Validate(ValidateCommand),

    /// Print the effective service endpoints
    Endpoints(EndpointsCommand),

    /// Merge operation registry files into a catalog
    Catalog(CatalogCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
