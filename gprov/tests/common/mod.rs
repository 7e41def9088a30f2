//! Common test utilities for integration tests.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Every environment variable the library reads.
#[allow(dead_code)]
pub const GPROV_ENV_VARS: &[&str] = &[
    "GOOGLE_CREDENTIALS",
    "GOOGLE_CLOUD_KEYFILE_JSON",
    "GCLOUD_KEYFILE_JSON",
    "GOOGLE_OAUTH_ACCESS_TOKEN",
    "GOOGLE_APPLICATION_CREDENTIALS",
    "GOOGLE_PROJECT",
    "GOOGLE_CLOUD_PROJECT",
    "GCLOUD_PROJECT",
    "CLOUDSDK_CORE_PROJECT",
    "GOOGLE_BILLING_PROJECT",
    "GOOGLE_REGION",
    "GCLOUD_REGION",
    "CLOUDSDK_COMPUTE_REGION",
    "GOOGLE_ZONE",
    "GCLOUD_ZONE",
    "CLOUDSDK_COMPUTE_ZONE",
    "GOOGLE_IMPERSONATE_SERVICE_ACCOUNT",
    "USER_PROJECT_OVERRIDE",
    "CLOUDSDK_CORE_REQUEST_REASON",
    "GOOGLE_TERRAFORM_USERAGENT_EXTENSION",
    "GOOGLE_COMPUTE_CUSTOM_ENDPOINT",
    "GOOGLE_STORAGE_CUSTOM_ENDPOINT",
];

/// RAII guard that restores an environment variable on drop.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Set `key` to `value` for the guard's lifetime.
    pub fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Remove `key` for the guard's lifetime.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clear every variable the library reads so tests start from a known state.
#[allow(dead_code)]
pub fn clear_gprov_env_vars() -> Vec<EnvGuard> {
    GPROV_ENV_VARS.iter().map(|k| EnvGuard::remove(k)).collect()
}

/// Write a file under `dir` and return its path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A service-account style key, optionally in a non-default universe.
#[allow(dead_code)]
pub fn key_json(universe_domain: Option<&str>) -> String {
    let mut key = serde_json::json!({
        "type": "service_account",
        "project_id": "test-project",
        "client_email": "sa@test-project.iam.gserviceaccount.com",
    });
    if let Some(domain) = universe_domain {
        key["universe_domain"] = serde_json::Value::String(domain.to_string());
    }
    key.to_string()
}
