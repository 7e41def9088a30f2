//! Provider settings.
//!
//! Settings arrive as a YAML document (or a [`RawSettings`] built in code)
//! and pass through three layers before assembly:
//!
//! 1. [`SettingsLoader`] discovers and parses the file
//! 2. [`EnvironmentDefaults`] fills unset fields from the environment
//! 3. [`SettingsValidator`] rejects malformed field values
//!
//! # Examples
//!
//! ```
//! use gprov::env::MapEnv;
//! use gprov::settings::{EnvironmentDefaults, SettingsLoader, SettingsValidator};
//!
//! let mut settings = SettingsLoader::parse("project: my-project\n").unwrap();
//! let env = MapEnv::new().with("GOOGLE_ZONE", "us-central1-f");
//! EnvironmentDefaults::apply(&mut settings, &env).unwrap();
//! SettingsValidator::validate(&settings).unwrap();
//!
//! assert_eq!(settings.project.as_deref(), Some("my-project"));
//! assert_eq!(settings.zone.as_deref(), Some("us-central1-f"));
//! ```

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validator;

pub use environment::{custom_endpoint_env_var, EnvironmentDefaults};
pub use loader::{SettingsLoader, SettingsSource};
pub use schema::{BatchingSettings, ExternalCredential, RawSettings};
pub use validator::SettingsValidator;
