//! Environment-sourced defaults for settings.
//!
//! Unlike file settings, environment values only fill fields the user left
//! unset; an explicit value in the settings always wins. Auth fields are not
//! handled here: the credential resolver consults the environment for them
//! only when every config-level auth field is empty.

use crate::endpoints::DEFAULT_BASE_PATHS;
use crate::env::{parse_bool, EnvSource};
use crate::error::{Error, Result};
use crate::settings::schema::RawSettings;

/// Project lookup order.
pub const PROJECT_ENV_VARS: &[&str] = &[
    "GOOGLE_PROJECT",
    "GOOGLE_CLOUD_PROJECT",
    "GCLOUD_PROJECT",
    "CLOUDSDK_CORE_PROJECT",
];

/// Billing project lookup order.
pub const BILLING_PROJECT_ENV_VARS: &[&str] = &["GOOGLE_BILLING_PROJECT"];

/// Region lookup order.
pub const REGION_ENV_VARS: &[&str] = &["GOOGLE_REGION", "GCLOUD_REGION", "CLOUDSDK_COMPUTE_REGION"];

/// Zone lookup order.
pub const ZONE_ENV_VARS: &[&str] = &["GOOGLE_ZONE", "GCLOUD_ZONE", "CLOUDSDK_COMPUTE_ZONE"];

/// Impersonated service account lookup order.
pub const IMPERSONATE_ENV_VARS: &[&str] = &["GOOGLE_IMPERSONATE_SERVICE_ACCOUNT"];

/// Request reason lookup order.
pub const REQUEST_REASON_ENV_VARS: &[&str] = &["CLOUDSDK_CORE_REQUEST_REASON"];

/// Boolean user-project-override variable.
pub const USER_PROJECT_OVERRIDE_ENV: &str = "USER_PROJECT_OVERRIDE";

/// Environment variable holding a custom endpoint for `service`.
///
/// # Examples
///
/// ```
/// use gprov::settings::custom_endpoint_env_var;
///
/// assert_eq!(custom_endpoint_env_var("cloud_run_v2"), "GOOGLE_CLOUD_RUN_V2_CUSTOM_ENDPOINT");
/// ```
#[must_use]
pub fn custom_endpoint_env_var(service: &str) -> String {
    format!("GOOGLE_{}_CUSTOM_ENDPOINT", service.to_uppercase())
}

/// Fills unset settings from the environment.
///
/// # Examples
///
/// ```
/// use gprov::env::MapEnv;
/// use gprov::settings::{EnvironmentDefaults, RawSettings};
///
/// let env = MapEnv::new().with("GOOGLE_REGION", "us-east1");
/// let mut settings = RawSettings::default();
/// EnvironmentDefaults::apply(&mut settings, &env).unwrap();
/// assert_eq!(settings.region.as_deref(), Some("us-east1"));
/// ```
pub struct EnvironmentDefaults;

impl EnvironmentDefaults {
    /// Apply environment defaults to every unset field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `USER_PROJECT_OVERRIDE` is set to
    /// something that is not a boolean.
    pub fn apply(settings: &mut RawSettings, env: &dyn EnvSource) -> Result<()> {
        Self::fill(&mut settings.project, PROJECT_ENV_VARS, env);
        Self::fill(&mut settings.billing_project, BILLING_PROJECT_ENV_VARS, env);
        Self::fill(&mut settings.region, REGION_ENV_VARS, env);
        Self::fill(&mut settings.zone, ZONE_ENV_VARS, env);
        Self::fill(&mut settings.impersonate_service_account, IMPERSONATE_ENV_VARS, env);
        Self::fill(&mut settings.request_reason, REQUEST_REASON_ENV_VARS, env);

        if settings.user_project_override.is_none() {
            if let Some(value) = env.non_empty(USER_PROJECT_OVERRIDE_ENV) {
                let parsed = parse_bool(&value).ok_or_else(|| Error::Validation {
                    field: USER_PROJECT_OVERRIDE_ENV.into(),
                    message: format!("expected a boolean, got {value:?}"),
                })?;
                settings.user_project_override = Some(parsed);
            }
        }

        for service in DEFAULT_BASE_PATHS {
            let present = settings
                .custom_endpoints
                .get(service.name)
                .is_some_and(|v| !v.is_empty());
            if present {
                continue;
            }
            if let Some(url) = env.non_empty(&custom_endpoint_env_var(service.name)) {
                log::debug!("custom endpoint for {} taken from environment", service.name);
                settings
                    .custom_endpoints
                    .insert(service.name.to_string(), url);
            }
        }

        Ok(())
    }

    fn fill(field: &mut Option<String>, names: &[&str], env: &dyn EnvSource) {
        if field.as_deref().is_some_and(|v| !v.is_empty()) {
            return;
        }
        if let Some(value) = env.first_non_empty(names) {
            *field = Some(value);
        }
    }
}
