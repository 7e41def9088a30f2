//! Environment variable access.
//!
//! All environment reads in this crate go through [`EnvSource`] so that
//! resolution logic can be exercised against an in-memory map instead of
//! the process environment.

use std::collections::HashMap;
use std::env;

/// A source of environment variables.
///
/// Empty values are treated the same as unset ones by every lookup helper.
pub trait EnvSource {
    /// Return the raw value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;

    /// Return the value of `name` if it is set and non-empty.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }

    /// Return the first non-empty value among `names`, searched in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use gprov::env::{EnvSource, MapEnv};
    ///
    /// let env = MapEnv::new()
    ///     .with("GOOGLE_CREDENTIALS", "")
    ///     .with("GCLOUD_KEYFILE_JSON", "B");
    ///
    /// let found = env.first_non_empty(&[
    ///     "GOOGLE_CREDENTIALS",
    ///     "GOOGLE_CLOUD_KEYFILE_JSON",
    ///     "GCLOUD_KEYFILE_JSON",
    /// ]);
    /// assert_eq!(found, Some("B".to_string()));
    /// ```
    fn first_non_empty(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| {
            let value = self.non_empty(name);
            if value.is_some() {
                log::debug!("using environment variable {name}");
            }
            value
        })
    }
}

/// Reads from the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// An in-memory environment, for tests and for hosts that pass the
/// environment explicitly.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Set a variable.
    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Parse a boolean environment value.
///
/// Accepts true/1/yes/on/t and false/0/no/off/f (case-insensitive).
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" => Some(true),
        "false" | "0" | "no" | "off" | "f" => Some(false),
        _ => None,
    }
}
