//! CLI command implementations.
//!
//! - `resolve`: Assemble and print the provider configuration
//! - `validate`: Check a settings file for errors
//! - `endpoints`: Print the effective per-service base paths
//! - `catalog`: Merge operation registry files
//! - `completions`: Generate shell completion scripts

pub mod catalog;
pub mod completions;
pub mod endpoints;
pub mod resolve;
pub mod validate;

pub use catalog::CatalogCommand;
pub use completions::CompletionsCommand;
pub use endpoints::EndpointsCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
