#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # gprov
//!
//! Configuration resolution for a Google Cloud provider plugin.
//!
//! Given user-supplied settings (credentials, regional defaults, endpoint
//! overrides, labeling and batching policy) this library produces one fully
//! validated [`ResolvedConfiguration`], and merges the provider's operation
//! registries into a catalog while reporting name collisions.
//!
//! ## Core Types
//!
//! - [`RawSettings`]: user settings, loaded from YAML or built in code
//! - [`ConfigAssembler`] and [`ResolvedConfiguration`]: the resolution engine
//! - [`EndpointTable`]: per-service base paths
//! - [`AuthMaterial`]: the single active credential source
//! - [`merge_registries`] and [`CatalogBuilder`]: operation catalog assembly
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use gprov::credentials::JsonCredentialLoader;
//! use gprov::env::MapEnv;
//! use gprov::{CancellationToken, ConfigAssembler, EndpointTable, RawSettings};
//!
//! let settings = RawSettings {
//!     credentials: Some(r#"{"type": "service_account", "universe_domain": "example.com"}"#.into()),
//!     universe_domain: Some("example.com".into()),
//!     ..Default::default()
//! };
//!
//! let env = MapEnv::new();
//! let config = ConfigAssembler::new(JsonCredentialLoader::with_env(env.clone()))
//!     .with_env(env)
//!     .with_base_endpoints(Arc::new(EndpointTable::defaults()))
//!     .assemble(&settings, &CancellationToken::new())
//!     .unwrap();
//!
//! assert_eq!(
//!     config.endpoints.get("storage"),
//!     Some("https://storage.example.com/storage/v1/")
//! );
//! ```

pub mod assembler;
pub mod batching;
pub mod cancellation;
pub mod catalog;
pub mod credentials;
pub mod duration;
pub mod endpoints;
pub mod env;
pub mod error;
pub mod labels;
pub mod logging;
pub mod registry;
pub mod settings;
pub mod universe;

// Re-export key types at crate root for convenience
pub use assembler::{ConfigAssembler, ResolvedConfiguration};
pub use batching::BatchingPolicy;
pub use cancellation::CancellationToken;
pub use catalog::{CatalogBuilder, MergeMode, OperationCatalog, OperationDescriptor, OperationKind};
pub use credentials::{AuthMaterial, CredentialLoader, CredentialResolver, LoadedCredentials};
pub use endpoints::{EndpointTable, TransportMode};
pub use error::{Error, Result};
pub use labels::{AttributionStrategy, LabelOperation, LabelPolicy};
pub use logging::{init_logger, LogLevel, Logger};
pub use registry::{merge_registries, MergeOutcome, OperationRegistry};
pub use settings::{RawSettings, SettingsLoader, SettingsValidator};
