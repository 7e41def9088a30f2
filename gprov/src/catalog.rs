//! Operation catalog assembly.
//!
//! A catalog holds every resource and data source the provider exposes.
//! It is built from several named registries merged in insertion order;
//! collisions are either reported alongside the catalog or rejected,
//! depending on the [`MergeMode`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::{merge_registries, OperationRegistry};

/// The kind of operation a catalog entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// A managed resource.
    Resource,
    /// A read-only data source.
    DataSource,
}

/// Catalog entry for one named operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Service the operation talks to.
    pub service: String,
    /// Resource or data source.
    pub kind: OperationKind,
}

impl OperationDescriptor {
    /// Describe a resource of `service`.
    #[must_use]
    pub fn resource(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            kind: OperationKind::Resource,
        }
    }

    /// Describe a data source of `service`.
    #[must_use]
    pub fn data_source(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            kind: OperationKind::DataSource,
        }
    }
}

/// How duplicate operation names are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Keep the last definition and report collisions as diagnostics.
    #[default]
    Lenient,
    /// Fail on any collision.
    Strict,
}

/// On-disk registry format.
///
/// ```yaml
/// resources:
///   google_compute_instance: compute
/// data_sources:
///   google_compute_image: compute
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    /// Resource name to service name.
    #[serde(default)]
    pub resources: BTreeMap<String, String>,
    /// Data source name to service name.
    #[serde(default)]
    pub data_sources: BTreeMap<String, String>,
}

impl RegistryFile {
    /// Load a registry file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a registry from YAML. An empty document is an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for invalid YAML.
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    fn into_registries(
        self,
    ) -> (
        OperationRegistry<OperationDescriptor>,
        OperationRegistry<OperationDescriptor>,
    ) {
        let resources = self
            .resources
            .into_iter()
            .map(|(name, service)| (name, OperationDescriptor::resource(service)))
            .collect();
        let data_sources = self
            .data_sources
            .into_iter()
            .map(|(name, service)| (name, OperationDescriptor::data_source(service)))
            .collect();
        (resources, data_sources)
    }
}

/// The merged catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationCatalog {
    /// All resources by name.
    pub resources: OperationRegistry<OperationDescriptor>,
    /// All data sources by name.
    pub data_sources: OperationRegistry<OperationDescriptor>,
}

/// A built catalog with any lenient-mode diagnostics.
#[derive(Debug)]
pub struct CatalogOutcome {
    /// The merged catalog.
    pub catalog: OperationCatalog,
    /// Duplicate diagnostics, one per kind that had collisions.
    pub diagnostics: Vec<Error>,
}

#[derive(Debug)]
struct NamedRegistry {
    name: String,
    resources: OperationRegistry<OperationDescriptor>,
    data_sources: OperationRegistry<OperationDescriptor>,
}

/// Collects registries and merges them into an [`OperationCatalog`].
///
/// # Examples
///
/// ```
/// use gprov::catalog::{CatalogBuilder, MergeMode, OperationDescriptor};
/// use gprov::registry::OperationRegistry;
///
/// let generated = OperationRegistry::from([
///     ("google_compute_instance".to_string(), OperationDescriptor::resource("compute")),
/// ]);
/// let handwritten = OperationRegistry::from([
///     ("google_storage_bucket".to_string(), OperationDescriptor::resource("storage")),
/// ]);
///
/// let mut builder = CatalogBuilder::new(MergeMode::Strict);
/// builder
///     .add("generated", generated, OperationRegistry::new())
///     .add("handwritten", handwritten, OperationRegistry::new());
/// let outcome = builder.build().unwrap();
/// assert_eq!(outcome.catalog.resources.len(), 2);
/// assert!(outcome.diagnostics.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    mode: MergeMode,
    sources: Vec<NamedRegistry>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new(mode: MergeMode) -> Self {
        Self {
            mode,
            sources: Vec::new(),
        }
    }

    /// The merge mode in use.
    #[must_use]
    pub const fn mode(&self) -> MergeMode {
        self.mode
    }

    /// Number of registries added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when no registry has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Add a named registry. Later registries override earlier ones.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        resources: OperationRegistry<OperationDescriptor>,
        data_sources: OperationRegistry<OperationDescriptor>,
    ) -> &mut Self {
        self.sources.push(NamedRegistry {
            name: name.into(),
            resources,
            data_sources,
        });
        self
    }

    /// Add a parsed registry file.
    pub fn add_file(&mut self, name: impl Into<String>, file: RegistryFile) -> &mut Self {
        let (resources, data_sources) = file.into_registries();
        self.add(name, resources, data_sources)
    }

    /// Merge every registry.
    ///
    /// # Errors
    ///
    /// In [`MergeMode::Strict`], returns [`Error::DuplicateOperations`]
    /// listing every colliding resource and data source name.
    pub fn build(self) -> Result<CatalogOutcome> {
        for source in &self.sources {
            log::debug!(
                "catalog registry {}: {} resource(s), {} data source(s)",
                source.name,
                source.resources.len(),
                source.data_sources.len()
            );
        }

        let (resources, data_sources): (Vec<_>, Vec<_>) = self
            .sources
            .into_iter()
            .map(|s| (s.resources, s.data_sources))
            .unzip();
        let resources = merge_registries(resources);
        let data_sources = merge_registries(data_sources);

        if self.mode == MergeMode::Strict {
            let mut keys = resources.duplicates.clone();
            keys.extend(data_sources.duplicates.iter().cloned());
            if !keys.is_empty() {
                return Err(Error::DuplicateOperations { keys });
            }
        }

        let (resources, resource_diag) = resources.split();
        let (data_sources, data_source_diag) = data_sources.split();
        let diagnostics: Vec<Error> = [resource_diag, data_source_diag]
            .into_iter()
            .flatten()
            .collect();
        for diagnostic in &diagnostics {
            log::warn!("{diagnostic}");
        }

        Ok(CatalogOutcome {
            catalog: OperationCatalog {
                resources,
                data_sources,
            },
            diagnostics,
        })
    }
}
