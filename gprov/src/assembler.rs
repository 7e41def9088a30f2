//! Configuration assembly.
//!
//! [`ConfigAssembler::assemble`] turns [`RawSettings`] into a
//! [`ResolvedConfiguration`] in a fixed order:
//!
//! 1. environment defaults fill unset fields
//! 2. the credential source is chosen
//! 3. user agent, request timeout and reason
//! 4. label policy
//! 5. batching policy
//! 6. credentials are loaded (the only blocking step)
//! 7. the universe domain is checked against the loaded credentials
//! 8. endpoints are derived from the shared table, rewritten for the
//!    universe domain, then custom overrides applied
//!
//! The first failure aborts assembly; no partial configuration is returned.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::batching::BatchingPolicy;
use crate::cancellation::CancellationToken;
use crate::credentials::{AuthMaterial, CredentialLoader, CredentialResolver};
use crate::duration::parse_duration;
use crate::endpoints::{is_known_service, EndpointTable};
use crate::env::{EnvSource, ProcessEnv};
use crate::error::{Error, Result};
use crate::labels::LabelPolicy;
use crate::settings::schema::non_empty;
use crate::settings::{EnvironmentDefaults, RawSettings};
use crate::universe::validate_universe_domain;

/// User agent sent when the host does not supply one.
pub const DEFAULT_USER_AGENT: &str = concat!("terraform-provider-google/", env!("CARGO_PKG_VERSION"));

/// Appended to the user agent when set.
pub const USER_AGENT_EXTENSION_ENV: &str = "GOOGLE_TERRAFORM_USERAGENT_EXTENSION";

/// Scopes requested when the settings list none.
pub const DEFAULT_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// The fully resolved provider configuration.
///
/// Built once per provider instance and never mutated afterwards.
/// Serializing it never exposes tokens or key material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    /// The active credential source.
    pub auth: AuthMaterial,
    /// Where the loaded credentials came from.
    pub credential_origin: String,
    /// Service account to impersonate.
    pub impersonate_service_account: Option<String>,
    /// Impersonation delegation chain.
    pub impersonate_service_account_delegates: Vec<String>,
    /// OAuth2 scopes.
    pub scopes: Vec<String>,
    /// Default project.
    pub project: Option<String>,
    /// Billing project.
    pub billing_project: Option<String>,
    /// Default region.
    pub region: Option<String>,
    /// Default zone.
    pub zone: Option<String>,
    /// Send the billing project as the quota project.
    pub user_project_override: bool,
    /// Resolved universe domain; empty for the default universe.
    pub universe_domain: String,
    /// Per-service base paths.
    pub endpoints: EndpointTable,
    /// Request batching.
    pub batching: BatchingPolicy,
    /// Labels and attribution.
    pub labels: LabelPolicy,
    /// Per-request timeout.
    pub request_timeout: Option<Duration>,
    /// Request reason header value.
    pub request_reason: Option<String>,
    /// Outgoing user agent.
    pub user_agent: String,
}

/// Assembles [`ResolvedConfiguration`] values.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use gprov::credentials::JsonCredentialLoader;
/// use gprov::endpoints::EndpointTable;
/// use gprov::env::MapEnv;
/// use gprov::settings::RawSettings;
/// use gprov::{CancellationToken, ConfigAssembler};
///
/// let env = MapEnv::new().with("GOOGLE_PROJECT", "demo");
/// let assembler = ConfigAssembler::new(JsonCredentialLoader::with_env(env.clone()))
///     .with_env(env)
///     .with_base_endpoints(Arc::new(EndpointTable::defaults()));
///
/// let config = assembler
///     .assemble(&RawSettings::default(), &CancellationToken::new())
///     .unwrap();
/// assert_eq!(config.project.as_deref(), Some("demo"));
/// assert_eq!(config.universe_domain, "");
/// ```
pub struct ConfigAssembler<L> {
    loader: L,
    env: Box<dyn EnvSource>,
    base_endpoints: Arc<EndpointTable>,
    user_agent: String,
}

impl<L: CredentialLoader> ConfigAssembler<L> {
    /// Create an assembler using the process environment and the shared
    /// default endpoint table.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            env: Box::new(ProcessEnv),
            base_endpoints: EndpointTable::shared_defaults(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Read environment values from `env` instead of the process.
    #[must_use]
    pub fn with_env<E: EnvSource + 'static>(mut self, env: E) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Derive endpoints from `table` instead of the shared defaults.
    #[must_use]
    pub fn with_base_endpoints(mut self, table: Arc<EndpointTable>) -> Self {
        self.base_endpoints = table;
        self
    }

    /// Use `user_agent` as the base user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Assemble the configuration for `raw`.
    ///
    /// # Errors
    ///
    /// Returns the first failure: malformed input, a credential-load
    /// failure or cancellation, or a universe domain mismatch.
    pub fn assemble(
        &self,
        raw: &RawSettings,
        cancel: &CancellationToken,
    ) -> Result<ResolvedConfiguration> {
        let env = self.env.as_ref();

        let mut settings = raw.clone();
        EnvironmentDefaults::apply(&mut settings, env)?;
        log::debug!("applied environment defaults");

        let auth = CredentialResolver::resolve(&settings, env);
        log::debug!("selected {} auth material", auth.kind());

        let user_agent = self.user_agent();
        let request_timeout = non_empty(settings.request_timeout.as_ref())
            .map(|value| parse_duration("request_timeout", value))
            .transpose()?;
        let request_reason = non_empty(settings.request_reason.as_ref()).map(str::to_string);

        let labels = LabelPolicy::from_settings(&settings)?;
        log::debug!("label policy: {} default label(s)", labels.default_labels.len());

        let batching = BatchingPolicy::expand(settings.batching.as_ref())?;
        log::debug!("batching policy: {batching:?}");

        if let Some(service) = settings
            .custom_endpoints
            .keys()
            .find(|service| !is_known_service(service))
        {
            return Err(Error::Validation {
                field: format!("custom_endpoints.{service}"),
                message: format!("unknown service {service:?}"),
            });
        }

        let scopes = if settings.scopes.is_empty() {
            DEFAULT_SCOPES.iter().map(|s| (*s).to_string()).collect()
        } else {
            settings.scopes.clone()
        };

        let loaded = self.loader.load(&auth, &scopes, cancel)?;
        log::debug!("loaded credentials: {}", loaded.origin);

        let universe_domain = validate_universe_domain(
            settings.universe_domain.as_deref(),
            &loaded.universe_domain,
        )?;

        let mut endpoints = EndpointTable::clone(&self.base_endpoints);
        endpoints.apply_universe_domain(&universe_domain);
        for (service, base_path) in &settings.custom_endpoints {
            if !base_path.is_empty() {
                log::debug!("custom endpoint for {service}: {base_path}");
                endpoints.set(service.as_str(), base_path.as_str());
            }
        }

        log::info!("provider configuration assembled");
        Ok(ResolvedConfiguration {
            auth,
            credential_origin: loaded.origin,
            impersonate_service_account: non_empty(settings.impersonate_service_account.as_ref())
                .map(str::to_string),
            impersonate_service_account_delegates: settings.impersonate_service_account_delegates,
            scopes,
            project: non_empty(settings.project.as_ref()).map(str::to_string),
            billing_project: non_empty(settings.billing_project.as_ref()).map(str::to_string),
            region: non_empty(settings.region.as_ref()).map(str::to_string),
            zone: non_empty(settings.zone.as_ref()).map(str::to_string),
            user_project_override: settings.user_project_override.unwrap_or(false),
            universe_domain,
            endpoints,
            batching,
            labels,
            request_timeout,
            request_reason,
            user_agent,
        })
    }

    fn user_agent(&self) -> String {
        match self.env.non_empty(USER_AGENT_EXTENSION_ENV) {
            Some(extension) => format!("{} {}", self.user_agent, extension.trim()),
            None => self.user_agent.clone(),
        }
    }
}
