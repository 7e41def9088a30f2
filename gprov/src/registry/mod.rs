//! Merging named-operation registries.
//!
//! The operation catalog is assembled from several registries (generated,
//! handwritten, specialized subsets). Merging is last-writer-wins, but every
//! collision is recorded so it can be reported instead of silently
//! shadowing an operation.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

#[cfg(test)]
mod proptests;

/// Mapping from unique operation name to an opaque descriptor.
pub type OperationRegistry<V> = BTreeMap<String, V>;

/// Result of merging registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome<V> {
    /// The merged registry.
    pub merged: OperationRegistry<V>,
    /// Every overwritten key, in encounter order.
    ///
    /// A key present in `n` registries appears `n - 1` times.
    pub duplicates: Vec<String>,
}

impl<V> MergeOutcome<V> {
    /// True when no key was overwritten.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// The duplicate diagnostic, if any key collided.
    #[must_use]
    pub fn diagnostic(&self) -> Option<Error> {
        if self.duplicates.is_empty() {
            None
        } else {
            Some(Error::DuplicateOperations {
                keys: self.duplicates.clone(),
            })
        }
    }

    /// Split into the merged registry and the duplicate diagnostic.
    #[must_use]
    pub fn split(self) -> (OperationRegistry<V>, Option<Error>) {
        let diagnostic = self.diagnostic();
        (self.merged, diagnostic)
    }

    /// The merged registry, or an error if any key collided.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateOperations`] listing every collision.
    pub fn into_strict(self) -> Result<OperationRegistry<V>> {
        match self.diagnostic() {
            Some(err) => Err(err),
            None => Ok(self.merged),
        }
    }
}

/// Merge registries in order; later entries overwrite earlier ones.
///
/// # Examples
///
/// ```
/// use gprov::registry::{merge_registries, OperationRegistry};
///
/// let first = OperationRegistry::from([("a".to_string(), 1)]);
/// let second = OperationRegistry::from([("a".to_string(), 2), ("b".to_string(), 3)]);
///
/// let outcome = merge_registries([first, second]);
/// assert_eq!(outcome.merged.get("a"), Some(&2));
/// assert_eq!(outcome.merged.get("b"), Some(&3));
/// assert_eq!(outcome.duplicates, vec!["a".to_string()]);
/// ```
pub fn merge_registries<V, I>(registries: I) -> MergeOutcome<V>
where
    I: IntoIterator<Item = OperationRegistry<V>>,
{
    let mut merged = OperationRegistry::new();
    let mut duplicates = Vec::new();

    for registry in registries {
        for (key, value) in registry {
            if merged.contains_key(&key) {
                duplicates.push(key.clone());
            }
            merged.insert(key, value);
        }
    }

    MergeOutcome { merged, duplicates }
}
