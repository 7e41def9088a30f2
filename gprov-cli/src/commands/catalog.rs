//! Catalog command implementation.
//!
//! Merges operation registry files in argument order. Each file is named
//! after its stem in diagnostics.

use crate::error::CliError;
use crate::utils::{render_structured, GlobalOptions, OutputFormat};
use clap::Args;
use gprov::catalog::RegistryFile;
use gprov::{CatalogBuilder, MergeMode};
use std::path::{Path, PathBuf};

/// Merge operation registry files into a catalog.
#[derive(Args)]
pub struct CatalogCommand {
    /// Registry files, later files override earlier ones
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Fail if any operation name appears in more than one file
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CatalogCommand {
    /// Execute the catalog command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mode = if self.strict {
            MergeMode::Strict
        } else {
            MergeMode::Lenient
        };

        let mut builder = CatalogBuilder::new(mode);
        for path in &self.files {
            if !path.exists() {
                return Err(CliError::InvalidArguments(format!(
                    "File not found: {}",
                    path.display()
                )));
            }
            let file = RegistryFile::load(path).map_err(|e| match e {
                gprov::Error::Io(io) => CliError::Io(io),
                other => CliError::Config(format!("{}: {other}", path.display())),
            })?;
            builder.add_file(registry_name(path), file);
        }

        let outcome = builder.build().map_err(|e| match e {
            gprov::Error::DuplicateOperations { keys } => CliError::SemanticFailure(format!(
                "duplicate operations in strict mode: {}",
                keys.join(", ")
            )),
            other => CliError::from(other),
        })?;

        match self.format {
            OutputFormat::Text => {
                println!("resources:    {}", outcome.catalog.resources.len());
                println!("data sources: {}", outcome.catalog.data_sources.len());
                if !global.quiet {
                    for diagnostic in &outcome.diagnostics {
                        eprintln!("Warning: {diagnostic}");
                    }
                }
            }
            format => print!("{}", render_structured(&outcome.catalog, format)?),
        }
        Ok(())
    }
}

fn registry_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_name() {
        assert_eq!(registry_name(Path::new("/tmp/generated.yaml")), "generated");
        assert_eq!(registry_name(Path::new("handwritten")), "handwritten");
    }
}
