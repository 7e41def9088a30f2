//! Main entry point for the gprov CLI.
//!
//! Commands:
//! - `resolve`: Assemble and print the provider configuration
//! - `validate`: Check a settings file
//! - `endpoints`: Print the effective service endpoints
//! - `catalog`: Merge operation registry files
//! - `completions`: Generate shell completions

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // A logger may already be installed in embedded use; keep going either way.
    let _ = gprov::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        quiet: cli.quiet,
        settings: cli.settings,
    };

    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Endpoints(cmd) => cmd.execute(&global),
        cli::Command::Catalog(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
