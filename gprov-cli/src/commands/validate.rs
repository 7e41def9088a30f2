//! Validate command implementation.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use gprov::{SettingsLoader, SettingsValidator};
use std::path::PathBuf;

/// Validate a settings file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Path to the settings file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command.
    ///
    /// Parse failures exit with code 7, semantic errors with code 1.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.path.display()
            )));
        }

        let settings = SettingsLoader::load_file(&self.path).map_err(|e| match e {
            gprov::Error::Io(io) => CliError::Io(io),
            other => CliError::Config(format!("{}: {other}", self.path.display())),
        })?;

        SettingsValidator::validate(&settings)?;

        if !global.quiet {
            println!("Settings file is valid: {}", self.path.display());
        }
        Ok(())
    }
}
