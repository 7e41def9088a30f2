//! Settings schema definitions.
//!
//! [`RawSettings`] holds the user-supplied provider settings after type
//! validation. Everything is optional; empty strings are treated as unset
//! by the resolution engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The user-supplied provider settings.
///
/// # Examples
///
/// ```
/// use gprov::settings::RawSettings;
///
/// let settings = RawSettings {
///     project: Some("my-project".to_string()),
///     region: Some("us-central1".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(settings.project.as_deref(), Some("my-project"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// Credential blob: JSON key contents or a path to a key file.
    pub credentials: Option<String>,

    /// OAuth2 access token, or a path to a file containing one.
    pub access_token: Option<String>,

    /// Workload identity federation credentials.
    pub external_credentials: Option<ExternalCredential>,

    /// Service account to impersonate.
    pub impersonate_service_account: Option<String>,

    /// Delegation chain used when impersonating.
    #[serde(default)]
    pub impersonate_service_account_delegates: Vec<String>,

    /// Default project.
    pub project: Option<String>,

    /// Project billed for API calls when `user_project_override` is set.
    pub billing_project: Option<String>,

    /// Default region.
    pub region: Option<String>,

    /// Default zone.
    pub zone: Option<String>,

    /// OAuth2 scopes requested for the credentials.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Universe domain, e.g. `googleapis.com`.
    pub universe_domain: Option<String>,

    /// Request batching block.
    pub batching: Option<BatchingSettings>,

    /// Send the billing project as the quota project.
    pub user_project_override: Option<bool>,

    /// Per-request timeout, as a duration string.
    pub request_timeout: Option<String>,

    /// Request reason header value.
    pub request_reason: Option<String>,

    /// Labels applied to every labelled resource.
    #[serde(default)]
    pub default_labels: BTreeMap<String, String>,

    /// Add the provisioning attribution label (defaults to true).
    pub add_terraform_attribution_label: Option<bool>,

    /// When to add the attribution label: `CREATION_ONLY` or `PROACTIVE`.
    pub terraform_attribution_label_addition_strategy: Option<String>,

    /// Custom base path per service name.
    #[serde(default)]
    pub custom_endpoints: BTreeMap<String, String>,
}

/// External (workload identity) credential record.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExternalCredential {
    /// Audience of the identity token.
    pub audience: String,
    /// Service account the identity is exchanged for.
    pub service_account_email: String,
    /// The identity token itself.
    pub identity_token: String,
}

impl ExternalCredential {
    /// True when all three fields are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.audience.is_empty()
            && !self.service_account_email.is_empty()
            && !self.identity_token.is_empty()
    }
}

impl std::fmt::Debug for ExternalCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalCredential")
            .field("audience", &self.audience)
            .field("service_account_email", &self.service_account_email)
            .field("identity_token", &"<redacted>")
            .finish()
    }
}

/// The `batching` block.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BatchingSettings {
    /// How long to wait before sending a batch.
    pub send_after: Option<String>,
    /// Whether batching is enabled.
    pub enable_batching: Option<bool>,
}

/// Return the value if it is present and non-empty.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}
