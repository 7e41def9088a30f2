//! Service endpoint table.
//!
//! Maps each known service name to its base-path template. The table for a
//! process is derived once from the built-in defaults and the transport mode
//! (see [`EndpointTable::shared_defaults`]) and is never mutated afterwards.
//! Each configure call clones that snapshot and rewrites its own copy for
//! the resolved universe domain and any custom endpoints.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use url::Url;

use crate::env::{parse_bool, EnvSource, ProcessEnv};

/// The default universe domain.
pub const DEFAULT_UNIVERSE_DOMAIN: &str = "googleapis.com";

/// Selects the mTLS endpoint variant: `always`, `never` or `auto`.
pub const MTLS_ENDPOINT_ENV: &str = "GOOGLE_API_USE_MTLS_ENDPOINT";

/// In `auto` mode, mTLS is used when this is true.
pub const CLIENT_CERTIFICATE_ENV: &str = "GOOGLE_API_USE_CLIENT_CERTIFICATE";

/// A known service and its default base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Service name, as used in `custom_endpoints`.
    pub name: &'static str,
    /// Default base-path template.
    pub base_path: &'static str,
}

/// Built-in base paths for every known service.
pub const DEFAULT_BASE_PATHS: &[ServiceEndpoint] = &[
    ServiceEndpoint { name: "access_context_manager", base_path: "https://accesscontextmanager.googleapis.com/v1/" },
    ServiceEndpoint { name: "artifact_registry", base_path: "https://artifactregistry.googleapis.com/v1/" },
    ServiceEndpoint { name: "bigquery", base_path: "https://bigquery.googleapis.com/bigquery/v2/" },
    ServiceEndpoint { name: "bigtable", base_path: "https://bigtableadmin.googleapis.com/v2/" },
    ServiceEndpoint { name: "cloud_billing", base_path: "https://cloudbilling.googleapis.com/v1/" },
    ServiceEndpoint { name: "cloud_functions", base_path: "https://cloudfunctions.googleapis.com/v1/" },
    ServiceEndpoint { name: "cloud_run_v2", base_path: "https://run.googleapis.com/v2/" },
    ServiceEndpoint { name: "compute", base_path: "https://compute.googleapis.com/compute/v1/" },
    ServiceEndpoint { name: "container", base_path: "https://container.googleapis.com/v1/" },
    ServiceEndpoint { name: "dns", base_path: "https://dns.googleapis.com/dns/v1/" },
    ServiceEndpoint { name: "iam", base_path: "https://iam.googleapis.com/v1/" },
    ServiceEndpoint { name: "iam_credentials", base_path: "https://iamcredentials.googleapis.com/v1/" },
    ServiceEndpoint { name: "kms", base_path: "https://cloudkms.googleapis.com/v1/" },
    ServiceEndpoint { name: "logging", base_path: "https://logging.googleapis.com/v2/" },
    ServiceEndpoint { name: "monitoring", base_path: "https://monitoring.googleapis.com/" },
    ServiceEndpoint { name: "pubsub", base_path: "https://pubsub.googleapis.com/v1/" },
    ServiceEndpoint { name: "redis", base_path: "https://redis.googleapis.com/v1/" },
    ServiceEndpoint { name: "resource_manager", base_path: "https://cloudresourcemanager.googleapis.com/v1/" },
    ServiceEndpoint { name: "secret_manager", base_path: "https://secretmanager.googleapis.com/v1/" },
    ServiceEndpoint { name: "service_usage", base_path: "https://serviceusage.googleapis.com/v1/" },
    ServiceEndpoint { name: "spanner", base_path: "https://spanner.googleapis.com/v1/" },
    ServiceEndpoint { name: "sql", base_path: "https://sqladmin.googleapis.com/sql/v1beta4/" },
    ServiceEndpoint { name: "storage", base_path: "https://storage.googleapis.com/storage/v1/" },
    ServiceEndpoint { name: "vertex_ai", base_path: "https://{{region}}-aiplatform.googleapis.com/v1/" },
];

/// Check whether `name` is a known service.
#[must_use]
pub fn is_known_service(name: &str) -> bool {
    DEFAULT_BASE_PATHS.iter().any(|s| s.name == name)
}

/// Transport used to reach Google APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Regular TLS endpoints.
    Standard,
    /// Mutual-TLS endpoints (`*.mtls.googleapis.com`).
    MutualTls,
}

impl TransportMode {
    /// Decide the transport mode from the environment.
    ///
    /// `GOOGLE_API_USE_MTLS_ENDPOINT=always` forces mTLS and `never` forbids
    /// it. Otherwise (`auto` or unset) mTLS is used only when
    /// `GOOGLE_API_USE_CLIENT_CERTIFICATE` is true.
    ///
    /// # Examples
    ///
    /// ```
    /// use gprov::endpoints::TransportMode;
    /// use gprov::env::MapEnv;
    ///
    /// let env = MapEnv::new().with("GOOGLE_API_USE_MTLS_ENDPOINT", "always");
    /// assert_eq!(TransportMode::detect(&env), TransportMode::MutualTls);
    /// assert_eq!(TransportMode::detect(&MapEnv::new()), TransportMode::Standard);
    /// ```
    pub fn detect(env: &dyn EnvSource) -> Self {
        let setting = env.non_empty(MTLS_ENDPOINT_ENV).map(|v| v.to_lowercase());
        match setting.as_deref() {
            Some("always") => Self::MutualTls,
            Some("never") => Self::Standard,
            other => {
                if let Some(value) = other.filter(|v| *v != "auto") {
                    log::warn!("ignoring unrecognized {MTLS_ENDPOINT_ENV} value {value:?}");
                }
                let use_cert = env
                    .non_empty(CLIENT_CERTIFICATE_ENV)
                    .and_then(|v| parse_bool(&v))
                    .unwrap_or(false);
                if use_cert {
                    Self::MutualTls
                } else {
                    Self::Standard
                }
            }
        }
    }
}

/// Convert a base path to its mTLS variant.
///
/// The first host label gains an `.mtls` suffix:
/// `https://compute.googleapis.com/compute/v1/` becomes
/// `https://compute.mtls.googleapis.com/compute/v1/`. Templates that are
/// not parseable URLs fall back to a textual replacement of the first
/// `.googleapis`; anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use gprov::endpoints::mtls_endpoint;
///
/// assert_eq!(
///     mtls_endpoint("https://compute.googleapis.com/compute/v1/"),
///     "https://compute.mtls.googleapis.com/compute/v1/"
/// );
/// ```
#[must_use]
pub fn mtls_endpoint(base_path: &str) -> String {
    if base_path.contains("{{") {
        return mtls_fallback(base_path);
    }

    let Ok(mut url) = Url::parse(base_path) else {
        return mtls_fallback(base_path);
    };
    let Some(host) = url.host_str() else {
        return base_path.to_string();
    };

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return base_path.to_string();
    }
    let mtls_host = format!("{}.mtls.{}", labels[0], labels[1..].join("."));
    if url.set_host(Some(&mtls_host)).is_err() {
        return mtls_fallback(base_path);
    }
    url.to_string()
}

fn mtls_fallback(base_path: &str) -> String {
    if base_path.contains(".googleapis") {
        base_path.replacen(".googleapis", ".mtls.googleapis", 1)
    } else {
        base_path.to_string()
    }
}

/// Replace every occurrence of the default domain with `domain`.
///
/// Empty and default domains leave the path unchanged.
#[must_use]
pub fn with_universe_domain(base_path: &str, domain: &str) -> String {
    if domain.is_empty() || domain == DEFAULT_UNIVERSE_DOMAIN {
        return base_path.to_string();
    }
    base_path.replace(DEFAULT_UNIVERSE_DOMAIN, domain)
}

static SHARED_DEFAULTS: OnceLock<Arc<EndpointTable>> = OnceLock::new();

/// Mapping from service name to base path.
///
/// # Examples
///
/// ```
/// use gprov::endpoints::EndpointTable;
///
/// let mut table: EndpointTable =
///     [("svc", "https://svc.googleapis.com/")].into_iter().collect();
/// table.apply_universe_domain("example.com");
/// assert_eq!(table.get("svc"), Some("https://svc.example.com/"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EndpointTable {
    entries: BTreeMap<String, String>,
}

impl EndpointTable {
    /// The built-in table for standard transport.
    #[must_use]
    pub fn defaults() -> Self {
        DEFAULT_BASE_PATHS
            .iter()
            .map(|s| (s.name, s.base_path))
            .collect()
    }

    /// The built-in table with the given transport rewrite applied.
    #[must_use]
    pub fn for_transport(mode: TransportMode) -> Self {
        let mut table = Self::defaults();
        if mode == TransportMode::MutualTls {
            log::debug!("rewriting endpoint table for mutual TLS");
            table.rewrite(mtls_endpoint);
        }
        table
    }

    /// The process-wide default table.
    ///
    /// Built on first use from the process environment and shared read-only
    /// afterwards. Callers clone it before applying per-configuration
    /// rewrites.
    #[must_use]
    pub fn shared_defaults() -> Arc<Self> {
        Arc::clone(SHARED_DEFAULTS.get_or_init(|| {
            Arc::new(Self::for_transport(TransportMode::detect(&ProcessEnv)))
        }))
    }

    /// Base path for `service`.
    #[must_use]
    pub fn get(&self, service: &str) -> Option<&str> {
        self.entries.get(service).map(String::as_str)
    }

    /// Set the base path for `service`.
    pub fn set(&mut self, service: impl Into<String>, base_path: impl Into<String>) {
        self.entries.insert(service.into(), base_path.into());
    }

    /// Iterate entries in service-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of services in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `transform` to every base path in place.
    pub fn rewrite<F>(&mut self, mut transform: F)
    where
        F: FnMut(&str) -> String,
    {
        for base_path in self.entries.values_mut() {
            *base_path = transform(base_path);
        }
    }

    /// Substitute a non-default universe domain into every base path.
    ///
    /// Idempotent: once substituted, the default domain no longer appears.
    pub fn apply_universe_domain(&mut self, domain: &str) {
        if domain.is_empty() || domain == DEFAULT_UNIVERSE_DOMAIN {
            return;
        }
        log::debug!("rewriting endpoint table for universe domain {domain}");
        self.rewrite(|base_path| with_universe_domain(base_path, domain));
    }
}

impl<K, V> FromIterator<(K, V)> for EndpointTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn test_defaults_cover_every_known_service() {
        let table = EndpointTable::defaults();
        assert_eq!(table.len(), DEFAULT_BASE_PATHS.len());
        assert_eq!(
            table.get("compute"),
            Some("https://compute.googleapis.com/compute/v1/")
        );
        assert!(is_known_service("storage"));
        assert!(!is_known_service("nonexistent"));
    }

    #[test]
    fn test_service_names_unique() {
        let mut names: Vec<&str> = DEFAULT_BASE_PATHS.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DEFAULT_BASE_PATHS.len());
    }

    #[test]
    fn test_universe_rewrite() {
        let mut table: EndpointTable = [("svc", "https://svc.googleapis.com/")].into_iter().collect();
        table.apply_universe_domain("example.com");
        assert_eq!(table.get("svc"), Some("https://svc.example.com/"));
    }

    #[test]
    fn test_universe_rewrite_idempotent() {
        let mut table: EndpointTable = [("svc", "https://svc.googleapis.com/")].into_iter().collect();
        table.apply_universe_domain("example.com");
        let once = table.clone();
        table.apply_universe_domain("example.com");
        assert_eq!(table, once);
    }

    #[test]
    fn test_universe_rewrite_default_is_noop() {
        let original = EndpointTable::defaults();
        let mut table = original.clone();
        table.apply_universe_domain("");
        table.apply_universe_domain(DEFAULT_UNIVERSE_DOMAIN);
        assert_eq!(table, original);
    }

    #[test]
    fn test_universe_rewrite_leaves_unrelated_entries() {
        let mut table: EndpointTable = [("custom", "https://proxy.internal/v1/")].into_iter().collect();
        table.apply_universe_domain("example.com");
        assert_eq!(table.get("custom"), Some("https://proxy.internal/v1/"));
    }

    #[test]
    fn test_mtls_endpoint() {
        assert_eq!(
            mtls_endpoint("https://storage.googleapis.com/storage/v1/"),
            "https://storage.mtls.googleapis.com/storage/v1/"
        );
        assert_eq!(
            mtls_endpoint("https://monitoring.googleapis.com/"),
            "https://monitoring.mtls.googleapis.com/"
        );
    }

    #[test]
    fn test_mtls_endpoint_template_fallback() {
        assert_eq!(
            mtls_endpoint("https://{{region}}-aiplatform.googleapis.com/v1/"),
            "https://{{region}}-aiplatform.mtls.googleapis.com/v1/"
        );
        assert_eq!(mtls_endpoint("not a url"), "not a url");
    }

    #[test]
    fn test_mtls_single_label_host_unchanged() {
        assert_eq!(mtls_endpoint("http://localhost:8080/"), "http://localhost:8080/");
    }

    #[test]
    fn test_for_transport() {
        let standard = EndpointTable::for_transport(TransportMode::Standard);
        assert_eq!(standard, EndpointTable::defaults());

        let mtls = EndpointTable::for_transport(TransportMode::MutualTls);
        assert!(mtls.iter().all(|(_, path)| path.contains(".mtls.")));
    }

    #[test]
    fn test_mtls_then_universe() {
        let mut table = EndpointTable::for_transport(TransportMode::MutualTls);
        table.apply_universe_domain("example.com");
        assert_eq!(
            table.get("compute"),
            Some("https://compute.mtls.example.com/compute/v1/")
        );
    }

    #[test]
    fn test_transport_detection() {
        let never = MapEnv::new()
            .with(MTLS_ENDPOINT_ENV, "never")
            .with(CLIENT_CERTIFICATE_ENV, "true");
        assert_eq!(TransportMode::detect(&never), TransportMode::Standard);

        let always = MapEnv::new().with(MTLS_ENDPOINT_ENV, "ALWAYS");
        assert_eq!(TransportMode::detect(&always), TransportMode::MutualTls);

        let auto_with_cert = MapEnv::new()
            .with(MTLS_ENDPOINT_ENV, "auto")
            .with(CLIENT_CERTIFICATE_ENV, "true");
        assert_eq!(TransportMode::detect(&auto_with_cert), TransportMode::MutualTls);

        let auto_without_cert = MapEnv::new().with(MTLS_ENDPOINT_ENV, "auto");
        assert_eq!(TransportMode::detect(&auto_without_cert), TransportMode::Standard);
    }

    #[test]
    fn test_shared_defaults_is_single_instance() {
        let a = EndpointTable::shared_defaults();
        let b = EndpointTable::shared_defaults();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), DEFAULT_BASE_PATHS.len());
    }

    #[test]
    fn test_rewrite_applies_transform_to_all() {
        let mut table = EndpointTable::defaults();
        table.rewrite(|p| format!("{p}x"));
        assert!(table.iter().all(|(_, p)| p.ends_with("/x")));
    }
}
