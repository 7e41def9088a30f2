//! Utility functions for CLI operations.
//!
//! Settings loading and output formatting shared across commands.

use crate::error::CliError;
use clap::ValueEnum;
use gprov::env::ProcessEnv;
use gprov::settings::{EnvironmentDefaults, SettingsLoader, SettingsSource};
use gprov::{RawSettings, SettingsValidator};
use serde::Serialize;
use std::env;

/// Global CLI options shared across all commands.
///
/// Verbosity only affects the logger, which `main` installs before any
/// command runs.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit settings file.
    pub settings: Option<std::path::PathBuf>,
}

/// Output format for structured command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML document.
    Yaml,
    /// Pretty-printed JSON.
    Json,
    /// Human-readable summary.
    Text,
}

/// Discover and parse the settings file.
///
/// A missing explicit file is an argument error; a missing default file
/// yields empty settings.
pub fn load_settings(global: &GlobalOptions) -> Result<SettingsSource, CliError> {
    if let Some(path) = &global.settings {
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }
    }

    let cwd = env::current_dir()?;
    SettingsLoader::load(global.settings.as_deref(), &cwd).map_err(CliError::from)
}

/// Load settings, fill environment defaults and validate.
pub fn prepare_settings(global: &GlobalOptions) -> Result<RawSettings, CliError> {
    let source = load_settings(global)?;
    if let Some(path) = &source.path {
        log::info!("using settings from {}", path.display());
    }

    let mut settings = source.settings;
    EnvironmentDefaults::apply(&mut settings, &ProcessEnv)?;
    SettingsValidator::validate(&settings)?;
    Ok(settings)
}

/// Serialize `value` as YAML or JSON.
///
/// Text output is command-specific, so callers handle it themselves.
pub fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::Config(e.to_string()))
        }
        OutputFormat::Json | OutputFormat::Text => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| CliError::Config(e.to_string())),
    }
}
