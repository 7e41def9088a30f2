//! Settings validation.
//!
//! Field-level checks run on a settings file before assembly, so bad input
//! is reported with the offending field name instead of surfacing halfway
//! through configuration.


use url::Url;

use crate::credentials::loader::expand_home;
use crate::duration::parse_duration;
use crate::endpoints::is_known_service;
use crate::error::{Error, Result};
use crate::labels::AttributionStrategy;
use crate::settings::schema::{non_empty, ExternalCredential, RawSettings};

/// Validates provider settings.
///
/// # Examples
///
/// ```
/// use gprov::settings::{RawSettings, SettingsValidator};
///
/// let settings = RawSettings::default();
/// SettingsValidator::validate(&settings).unwrap();
///
/// let bad = RawSettings {
///     universe_domain: Some("bad domain".into()),
///     ..Default::default()
/// };
/// assert!(SettingsValidator::validate(&bad).is_err());
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate a complete settings value.
    ///
    /// # Errors
    ///
    /// Returns the first failure found as [`Error::Validation`].
    pub fn validate(settings: &RawSettings) -> Result<()> {
        Self::validate_auth(settings)?;

        if let Some(domain) = non_empty(settings.universe_domain.as_ref()) {
            Self::validate_universe_domain(domain)?;
        }

        for scope in &settings.scopes {
            if scope.trim().is_empty() {
                return Err(Error::Validation {
                    field: "scopes".into(),
                    message: "scopes cannot contain empty entries".into(),
                });
            }
        }

        for delegate in &settings.impersonate_service_account_delegates {
            if delegate.trim().is_empty() {
                return Err(Error::Validation {
                    field: "impersonate_service_account_delegates".into(),
                    message: "delegates cannot contain empty entries".into(),
                });
            }
        }

        if settings.default_labels.keys().any(|key| key.is_empty()) {
            return Err(Error::Validation {
                field: "default_labels".into(),
                message: "label keys cannot be empty".into(),
            });
        }

        if let Some(timeout) = non_empty(settings.request_timeout.as_ref()) {
            Self::validate_duration("request_timeout", timeout)?;
        }

        if let Some(batching) = &settings.batching {
            if let Some(send_after) = non_empty(batching.send_after.as_ref()) {
                Self::validate_duration("batching.send_after", send_after)?;
            }
        }

        if let Some(strategy) =
            non_empty(settings.terraform_attribution_label_addition_strategy.as_ref())
        {
            strategy
                .parse::<AttributionStrategy>()
                .map_err(|e| Error::Validation {
                    field: "terraform_attribution_label_addition_strategy".into(),
                    message: e.to_string(),
                })?;
        }

        for (service, url) in &settings.custom_endpoints {
            Self::validate_custom_endpoint(service, url)?;
        }

        Ok(())
    }

    /// Check the mutually exclusive auth fields and their contents.
    fn validate_auth(settings: &RawSettings) -> Result<()> {
        let credentials = non_empty(settings.credentials.as_ref());
        let access_token = non_empty(settings.access_token.as_ref());

        if credentials.is_some() && access_token.is_some() {
            return Err(Error::Validation {
                field: "access_token".into(),
                message: "conflicts with credentials; set only one".into(),
            });
        }

        if let Some(external) = &settings.external_credentials {
            if credentials.is_some() || access_token.is_some() {
                return Err(Error::Validation {
                    field: "external_credentials".into(),
                    message: "conflicts with credentials and access_token; set only one".into(),
                });
            }
            Self::validate_external_credential(external)?;
        }

        if let Some(blob) = credentials {
            Self::validate_credentials(blob)?;
        }

        Ok(())
    }

    fn validate_external_credential(external: &ExternalCredential) -> Result<()> {
        let fields = [
            ("external_credentials.audience", &external.audience),
            (
                "external_credentials.service_account_email",
                &external.service_account_email,
            ),
            ("external_credentials.identity_token", &external.identity_token),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    field: field.into(),
                    message: "cannot be empty".into(),
                });
            }
        }
        Ok(())
    }

    /// A credential blob is either a path to an existing file or JSON.
    /// Paths may start with `~/`.
    fn validate_credentials(blob: &str) -> Result<()> {
        if expand_home(blob).is_file() {
            return Ok(());
        }
        serde_json::from_str::<serde_json::Value>(blob)
            .map(|_| ())
            .map_err(|e| Error::Validation {
                field: "credentials".into(),
                message: format!("not a readable file path and not valid JSON: {e}"),
            })
    }

    fn validate_universe_domain(domain: &str) -> Result<()> {
        if domain.contains('/') || domain.chars().any(char::is_whitespace) {
            return Err(Error::Validation {
                field: "universe_domain".into(),
                message: format!("{domain:?} is not a bare domain name"),
            });
        }
        Ok(())
    }

    fn validate_duration(field: &str, value: &str) -> Result<()> {
        parse_duration(field, value)
            .map(|_| ())
            .map_err(|e| Error::Validation {
                field: field.into(),
                message: e.to_string(),
            })
    }

    /// Custom endpoints must name a known service and be an http(s) URL
    /// with a trailing slash. Empty values are treated as unset.
    fn validate_custom_endpoint(service: &str, url: &str) -> Result<()> {
        let field = format!("custom_endpoints.{service}");
        if !is_known_service(service) {
            return Err(Error::Validation {
                field,
                message: format!("unknown service {service:?}"),
            });
        }
        if url.is_empty() {
            return Ok(());
        }

        let parsed = Url::parse(url).map_err(|e| Error::Validation {
            field: field.clone(),
            message: format!("invalid URL {url:?}: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Validation {
                field,
                message: format!("URL must use http or https, got {:?}", parsed.scheme()),
            });
        }
        if !url.ends_with('/') {
            return Err(Error::Validation {
                field,
                message: "URL must end with a trailing slash".into(),
            });
        }
        Ok(())
    }
}
