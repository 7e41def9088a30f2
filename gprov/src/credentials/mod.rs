//! Credential source selection and loading.
//!
//! [`CredentialResolver`] picks exactly one [`AuthMaterial`] from the
//! settings, falling back to the environment only when every config-level
//! auth field is empty. A [`CredentialLoader`] then turns that material into
//! [`LoadedCredentials`], the only part of configuration that may block.

pub mod loader;

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::env::EnvSource;
use crate::settings::schema::{non_empty, ExternalCredential, RawSettings};

pub use loader::{CredentialLoader, JsonCredentialLoader, LoadedCredentials};

/// Environment variables searched, in order, for a credential blob.
pub const CREDENTIALS_ENV_VARS: &[&str] = &[
    "GOOGLE_CREDENTIALS",
    "GOOGLE_CLOUD_KEYFILE_JSON",
    "GCLOUD_KEYFILE_JSON",
];

/// Environment variables searched for an access token.
pub const ACCESS_TOKEN_ENV_VARS: &[&str] = &["GOOGLE_OAUTH_ACCESS_TOKEN"];

/// The single active credential source.
///
/// Debug and serialized output never include token or key contents.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMaterial {
    /// Nothing configured; use application default credentials.
    Ambient,
    /// Workload identity federation.
    External(ExternalCredential),
    /// A literal OAuth2 access token (or a path to one).
    ///
    /// A credential blob given alongside the token is carried here and the
    /// token takes precedence when loading.
    AccessToken {
        /// Token contents or path.
        token: String,
        /// Credential blob set alongside the token, if any.
        credentials: Option<String>,
    },
    /// A credential blob: JSON contents or a key-file path.
    Credentials(String),
}

impl AuthMaterial {
    /// Short name of the source kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::External(_) => "external",
            Self::AccessToken { .. } => "access_token",
            Self::Credentials(_) => "credentials",
        }
    }
}

impl fmt::Debug for AuthMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => f.write_str("Ambient"),
            Self::External(cred) => f.debug_tuple("External").field(cred).finish(),
            Self::AccessToken { credentials, .. } => f
                .debug_struct("AccessToken")
                .field("token", &"<redacted>")
                .field("credentials", &credentials.as_ref().map(|_| "<redacted>"))
                .finish(),
            Self::Credentials(_) => f.debug_tuple("Credentials").field(&"<redacted>").finish(),
        }
    }
}

impl Serialize for AuthMaterial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        match self {
            Self::Ambient => {}
            Self::External(cred) => {
                map.serialize_entry("audience", &cred.audience)?;
                map.serialize_entry("service_account_email", &cred.service_account_email)?;
            }
            Self::AccessToken { credentials, .. } => {
                map.serialize_entry("credentials_present", &credentials.is_some())?;
            }
            Self::Credentials(blob) => {
                let looks_like_json = blob.trim_start().starts_with('{');
                map.serialize_entry("inline", &looks_like_json)?;
            }
        }
        map.end()
    }
}

/// Chooses the active credential source.
///
/// # Examples
///
/// ```
/// use gprov::credentials::{AuthMaterial, CredentialResolver};
/// use gprov::env::MapEnv;
/// use gprov::settings::RawSettings;
///
/// let env = MapEnv::new().with("GOOGLE_CREDENTIALS", "{}");
/// let auth = CredentialResolver::resolve(&RawSettings::default(), &env);
/// assert_eq!(auth, AuthMaterial::Credentials("{}".into()));
/// ```
pub struct CredentialResolver;

impl CredentialResolver {
    /// Resolve the auth material for `settings`.
    ///
    /// 1. A complete external credential wins outright.
    /// 2. Otherwise a configured access token, carrying any configured blob.
    /// 3. Otherwise a configured credential blob.
    /// 4. With no config-level auth at all, the same rules over the
    ///    environment, then [`AuthMaterial::Ambient`].
    #[must_use]
    pub fn resolve(settings: &RawSettings, env: &dyn EnvSource) -> AuthMaterial {
        if let Some(external) = settings
            .external_credentials
            .as_ref()
            .filter(|cred| cred.is_complete())
        {
            log::debug!("using external credentials from settings");
            return AuthMaterial::External(external.clone());
        }

        let token = non_empty(settings.access_token.as_ref()).map(str::to_string);
        let blob = non_empty(settings.credentials.as_ref()).map(str::to_string);
        if token.is_some() || blob.is_some() {
            log::debug!("using auth material from settings");
            return Self::combine(token, blob);
        }

        let blob = env.first_non_empty(CREDENTIALS_ENV_VARS);
        let token = env.first_non_empty(ACCESS_TOKEN_ENV_VARS);
        let material = Self::combine(token, blob);
        log::debug!("auth material resolved to {}", material.kind());
        material
    }

    fn combine(token: Option<String>, blob: Option<String>) -> AuthMaterial {
        match (token, blob) {
            (Some(token), credentials) => AuthMaterial::AccessToken { token, credentials },
            (None, Some(blob)) => AuthMaterial::Credentials(blob),
            (None, None) => AuthMaterial::Ambient,
        }
    }
}
