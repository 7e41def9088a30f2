//! Endpoints command implementation.
//!
//! Prints the endpoint table the provider would use, honoring the
//! configured universe domain and custom endpoints. Credentials are not
//! loaded, so the universe domain is taken as declared.

use crate::error::CliError;
use crate::utils::{prepare_settings, render_structured, GlobalOptions, OutputFormat};
use clap::Args;
use gprov::endpoints::is_known_service;
use gprov::{EndpointTable, RawSettings};

/// Print the effective service endpoints.
#[derive(Args)]
pub struct EndpointsCommand {
    /// Only print the endpoint for this service
    #[arg(long, value_name = "NAME")]
    pub service: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl EndpointsCommand {
    /// Execute the endpoints command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if let Some(service) = &self.service {
            if !is_known_service(service) {
                return Err(CliError::InvalidArguments(format!("Unknown service: {service}")));
            }
        }

        let settings = prepare_settings(global)?;
        let table = effective_table(&EndpointTable::shared_defaults(), &settings);

        let table: EndpointTable = match &self.service {
            Some(service) => table
                .iter()
                .filter(|(name, _)| *name == service.as_str())
                .map(|(name, path)| (name.to_string(), path.to_string()))
                .collect(),
            None => table,
        };

        match self.format {
            OutputFormat::Text => {
                for (name, path) in table.iter() {
                    println!("{name}\t{path}");
                }
            }
            format => print!("{}", render_structured(&table, format)?),
        }
        Ok(())
    }
}

fn effective_table(base: &EndpointTable, settings: &RawSettings) -> EndpointTable {
    let mut table = base.clone();
    if let Some(domain) = settings.universe_domain.as_deref().filter(|d| !d.is_empty()) {
        table.apply_universe_domain(domain);
    }
    for (service, path) in &settings.custom_endpoints {
        if !path.is_empty() {
            table.set(service.clone(), path.clone());
        }
    }
    table
}
