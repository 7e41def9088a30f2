//! Common test utilities for CLI integration tests.
//!
//! Every command runs in its own temporary directory with `HOME` pointed
//! at it and the provider environment variables removed.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into a test.
const HOST_ENV_VARS: &[&str] = &[
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
    "GOOGLE_API_USE_MTLS_ENDPOINT",
    "GOOGLE_API_USE_CLIENT_CERTIFICATE",
    "GOOGLE_COMPUTE_CUSTOM_ENDPOINT",
    "GOOGLE_STORAGE_CUSTOM_ENDPOINT",
    "GPROV_SETTINGS",
    "GPROV_LOG_MODE",
];

/// Isolated test environment.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory.
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// A gprov command running inside the temp directory with a clean
    /// environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gprov").expect("Failed to find gprov binary");
        cmd.current_dir(&self.temp_path).env("HOME", &self.temp_path);
        for var in HOST_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temp directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write `gprov.yaml` in the working directory.
    pub fn write_settings(&self, contents: &str) -> PathBuf {
        self.write_file("gprov.yaml", contents)
    }

    /// Write a service account key, optionally in a non-default universe.
    pub fn write_key(&self, name: &str, universe_domain: Option<&str>) -> PathBuf {
        let mut key = serde_json::json!({
            "type": "service_account",
            "project_id": "test-project",
        });
        if let Some(domain) = universe_domain {
            key["universe_domain"] = serde_json::Value::String(domain.to_string());
        }
        self.write_file(name, &key.to_string())
    }
}
