//! Turning auth material into loaded credentials.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cancellation::CancellationToken;
use crate::credentials::AuthMaterial;
use crate::env::{EnvSource, ProcessEnv};
use crate::error::{Error, Result};

/// Points at a credential file used when nothing else is configured.
pub const APPLICATION_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

const LOAD_STAGE: &str = "credential loading";

/// The outcome of loading credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedCredentials {
    /// Universe domain carried by the credentials; empty means the default.
    pub universe_domain: String,
    /// Human-readable description of where the credentials came from.
    pub origin: String,
}

/// Loads credentials for the resolved auth material.
///
/// This is the one potentially blocking step of configuration. Loaders
/// must honour `cancel` and report failures unmodified through
/// [`Error::CredentialLoad`].
#[cfg_attr(test, mockall::automock)]
pub trait CredentialLoader {
    /// Load credentials for `auth` with the requested `scopes`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialLoad`] when the material cannot be used,
    /// or [`Error::Cancelled`] when `cancel` fires.
    fn load(
        &self,
        auth: &AuthMaterial,
        scopes: &[String],
        cancel: &CancellationToken,
    ) -> Result<LoadedCredentials>;
}

/// Built-in loader for JSON key files and literal tokens.
///
/// Tokens and blobs may be given literally or as a path to a file. Blobs
/// must be JSON objects; their `universe_domain` field, when present,
/// becomes the implied universe domain.
///
/// # Examples
///
/// ```
/// use gprov::credentials::{AuthMaterial, CredentialLoader, JsonCredentialLoader};
/// use gprov::env::MapEnv;
/// use gprov::CancellationToken;
///
/// let loader = JsonCredentialLoader::with_env(MapEnv::new());
/// let auth = AuthMaterial::Credentials(r#"{"universe_domain": "example.com"}"#.into());
/// let loaded = loader.load(&auth, &[], &CancellationToken::new()).unwrap();
/// assert_eq!(loaded.universe_domain, "example.com");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonCredentialLoader<E = ProcessEnv> {
    env: E,
}

impl JsonCredentialLoader<ProcessEnv> {
    /// Create a loader reading the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self { env: ProcessEnv }
    }
}

impl<E: EnvSource> JsonCredentialLoader<E> {
    /// Create a loader reading the given environment.
    #[must_use]
    pub fn with_env(env: E) -> Self {
        Self { env }
    }

    fn load_blob(blob: &str, cancel: &CancellationToken) -> Result<LoadedCredentials> {
        let (contents, origin) = read_path_or_contents(blob)?;
        cancel.check(LOAD_STAGE)?;

        let value: Value = serde_json::from_str(&contents).map_err(Error::credential_load)?;
        let Value::Object(fields) = value else {
            return Err(Error::credential_load("credentials JSON must be an object"));
        };

        let universe_domain = fields
            .get("universe_domain")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let kind = fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("credentials");

        Ok(LoadedCredentials {
            universe_domain,
            origin: format!("{kind} from {origin}"),
        })
    }

    fn load_token(token: &str, cancel: &CancellationToken) -> Result<LoadedCredentials> {
        let (contents, origin) = read_path_or_contents(token)?;
        cancel.check(LOAD_STAGE)?;

        if contents.trim().is_empty() {
            return Err(Error::credential_load("access token is empty"));
        }
        Ok(LoadedCredentials {
            universe_domain: String::new(),
            origin: format!("access token from {origin}"),
        })
    }
}

impl<E: EnvSource> CredentialLoader for JsonCredentialLoader<E> {
    fn load(
        &self,
        auth: &AuthMaterial,
        scopes: &[String],
        cancel: &CancellationToken,
    ) -> Result<LoadedCredentials> {
        cancel.check(LOAD_STAGE)?;
        log::debug!(
            "loading {} credentials with {} scope(s)",
            auth.kind(),
            scopes.len()
        );

        match auth {
            AuthMaterial::External(cred) => Ok(LoadedCredentials {
                universe_domain: String::new(),
                origin: format!("external account for {}", cred.service_account_email),
            }),
            AuthMaterial::AccessToken { token, credentials } => {
                if credentials.is_some() {
                    log::debug!("access token takes precedence over credentials");
                }
                Self::load_token(token, cancel)
            }
            AuthMaterial::Credentials(blob) => Self::load_blob(blob, cancel),
            AuthMaterial::Ambient => match self.env.non_empty(APPLICATION_CREDENTIALS_ENV) {
                Some(path) => Self::load_blob(&path, cancel),
                None => Ok(LoadedCredentials {
                    universe_domain: String::new(),
                    origin: "application default credentials".into(),
                }),
            },
        }
    }
}

/// Read `value` as a file when it names one, otherwise use it literally.
///
/// Returns the contents and a description of where they came from.
fn read_path_or_contents(value: &str) -> Result<(String, String)> {
    if value.trim_start().starts_with('{') {
        return Ok((value.to_string(), "inline contents".into()));
    }

    let path = expand_home(value);
    if path.is_file() {
        let contents = fs::read_to_string(&path).map_err(|e| {
            Error::credential_load(format!("cannot read {}: {e}", path.display()))
        })?;
        return Ok((contents, path.display().to_string()));
    }

    Ok((value.to_string(), "inline contents".into()))
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/") {
        if let Some(home) = home::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(value).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use crate::settings::ExternalCredential;
    use tempfile::TempDir;

    fn loader() -> JsonCredentialLoader<MapEnv> {
        JsonCredentialLoader::with_env(MapEnv::new())
    }

    #[test]
    fn test_inline_blob_without_universe() {
        let auth = AuthMaterial::Credentials(r#"{"type": "service_account"}"#.into());
        let loaded = loader().load(&auth, &[], &CancellationToken::new()).unwrap();
        assert_eq!(loaded.universe_domain, "");
        assert!(loaded.origin.contains("service_account"));
    }

    #[test]
    fn test_blob_from_file() {
        let dir = TempDir::new().unwrap();
        let key = dir.path().join("key.json");
        fs::write(&key, r#"{"type": "service_account", "universe_domain": "example.com"}"#)
            .unwrap();

        let auth = AuthMaterial::Credentials(key.to_string_lossy().into_owned());
        let loaded = loader().load(&auth, &[], &CancellationToken::new()).unwrap();
        assert_eq!(loaded.universe_domain, "example.com");
        assert!(loaded.origin.contains("key.json"));
    }

    #[test]
    fn test_malformed_blob_is_credential_failure() {
        let auth = AuthMaterial::Credentials("not-json-and-not-a-file".into());
        let err = loader().load(&auth, &[], &CancellationToken::new()).unwrap_err();
        assert!(err.is_credential_failure());

        let auth = AuthMaterial::Credentials("[1, 2]".into());
        let err = loader().load(&auth, &[], &CancellationToken::new()).unwrap_err();
        assert_eq!(err.to_string(), "credentials JSON must be an object");
    }

    #[test]
    fn test_token_preferred_over_blob() {
        let auth = AuthMaterial::AccessToken {
            token: "ya29.token".into(),
            credentials: Some(r#"{"universe_domain": "example.com"}"#.into()),
        };
        let loaded = loader().load(&auth, &[], &CancellationToken::new()).unwrap();
        assert_eq!(loaded.universe_domain, "");
        assert!(loaded.origin.starts_with("access token"));
    }

    #[test]
    fn test_token_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "ya29.file-token\n").unwrap();
        let auth = AuthMaterial::AccessToken {
            token: path.to_string_lossy().into_owned(),
            credentials: None,
        };
        let loaded = loader().load(&auth, &[], &CancellationToken::new()).unwrap();
        assert!(loaded.origin.contains("token"));
    }

    #[test]
    fn test_external_has_default_universe() {
        let auth = AuthMaterial::External(ExternalCredential {
            audience: "aud".into(),
            service_account_email: "sa@p.iam.gserviceaccount.com".into(),
            identity_token: "id".into(),
        });
        let loaded = loader().load(&auth, &[], &CancellationToken::new()).unwrap();
        assert_eq!(loaded.universe_domain, "");
        assert!(loaded.origin.contains("sa@p.iam.gserviceaccount.com"));
    }

    #[test]
    fn test_ambient_reads_application_credentials() {
        let dir = TempDir::new().unwrap();
        let key = dir.path().join("adc.json");
        fs::write(&key, r#"{"type": "authorized_user", "universe_domain": "example.org"}"#)
            .unwrap();
        let env = MapEnv::new().with(APPLICATION_CREDENTIALS_ENV, &key.to_string_lossy());
        let loaded = JsonCredentialLoader::with_env(env)
            .load(&AuthMaterial::Ambient, &[], &CancellationToken::new())
            .unwrap();
        assert_eq!(loaded.universe_domain, "example.org");
    }

    #[test]
    fn test_ambient_without_file() {
        let loaded = loader()
            .load(&AuthMaterial::Ambient, &[], &CancellationToken::new())
            .unwrap();
        assert_eq!(loaded, LoadedCredentials {
            universe_domain: String::new(),
            origin: "application default credentials".into(),
        });
    }

    #[test]
    fn test_cancelled_before_load() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = loader()
            .load(&AuthMaterial::Credentials("{}".into()), &[], &cancel)
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
    }

    #[test]
    fn test_read_path_or_contents_literal() {
        let (contents, origin) = read_path_or_contents("{\"a\": 1}").unwrap();
        assert_eq!(contents, "{\"a\": 1}");
        assert_eq!(origin, "inline contents");
    }
}
