//! Library exports for gprov-cli.
//!
//! Exposes the CLI structure for documentation tooling and tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
