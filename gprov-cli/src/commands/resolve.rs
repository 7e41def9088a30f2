//! Resolve command implementation.
//!
//! Loads settings, fills environment defaults, loads credentials and
//! prints the resulting configuration.

use crate::error::CliError;
use crate::utils::{prepare_settings, render_structured, GlobalOptions, OutputFormat};
use clap::Args;
use gprov::credentials::JsonCredentialLoader;
use gprov::{CancellationToken, ConfigAssembler, ResolvedConfiguration};
use std::fmt::Write as _;

/// Resolve and print the provider configuration.
#[derive(Args)]
pub struct ResolveCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = prepare_settings(global)?;

        let assembler = ConfigAssembler::new(JsonCredentialLoader::new());
        let config = assembler.assemble(&settings, &CancellationToken::new())?;

        let output = match self.format {
            OutputFormat::Text => format_text(&config),
            format => render_structured(&config, format)?,
        };
        print!("{output}");
        Ok(())
    }
}

fn format_text(config: &ResolvedConfiguration) -> String {
    let mut out = String::new();
    let unset = "(unset)";
    let universe = if config.universe_domain.is_empty() {
        gprov::endpoints::DEFAULT_UNIVERSE_DOMAIN
    } else {
        config.universe_domain.as_str()
    };

    let _ = writeln!(out, "auth:            {}", config.auth.kind());
    let _ = writeln!(out, "credentials:     {}", config.credential_origin);
    let _ = writeln!(out, "project:         {}", config.project.as_deref().unwrap_or(unset));
    let _ = writeln!(
        out,
        "billing project: {}",
        config.billing_project.as_deref().unwrap_or(unset)
    );
    let _ = writeln!(out, "region:          {}", config.region.as_deref().unwrap_or(unset));
    let _ = writeln!(out, "zone:            {}", config.zone.as_deref().unwrap_or(unset));
    let _ = writeln!(out, "universe domain: {universe}");
    let _ = writeln!(out, "scopes:          {}", config.scopes.join(", "));
    let _ = writeln!(out, "user agent:      {}", config.user_agent);
    if let Some(timeout) = config.request_timeout {
        let _ = writeln!(out, "request timeout: {}s", timeout.as_secs_f64());
    }
    let _ = writeln!(
        out,
        "batching:        {} (send after {}s)",
        if config.batching.enabled { "enabled" } else { "disabled" },
        config.batching.send_after.as_secs_f64()
    );
    let _ = writeln!(out, "endpoints:       {}", config.endpoints.len());
    out
}
