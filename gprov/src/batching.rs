//! Request batching policy.

use std::time::Duration;

use serde::Serialize;

use crate::duration::parse_duration;
use crate::error::Result;
use crate::settings::schema::{non_empty, BatchingSettings};

/// Delay used when a batching block omits `send_after`.
pub const DEFAULT_SEND_AFTER: Duration = Duration::from_secs(10);

/// Normalized batching policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchingPolicy {
    /// Whether requests are batched.
    pub enabled: bool,
    /// How long to wait before sending a batch.
    pub send_after: Duration,
}

impl BatchingPolicy {
    /// Expand an optional `batching` block.
    ///
    /// An absent block gives the zero policy (disabled, zero delay). In a
    /// present block `send_after` defaults to 10s and `enable_batching` to
    /// true.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDuration`] for a malformed
    /// `send_after`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use gprov::batching::BatchingPolicy;
    /// use gprov::settings::BatchingSettings;
    ///
    /// assert_eq!(BatchingPolicy::expand(None).unwrap(), BatchingPolicy::default());
    ///
    /// let block = BatchingSettings {
    ///     send_after: Some("10s".into()),
    ///     enable_batching: Some(true),
    /// };
    /// let policy = BatchingPolicy::expand(Some(&block)).unwrap();
    /// assert!(policy.enabled);
    /// assert_eq!(policy.send_after, Duration::from_secs(10));
    /// ```
    pub fn expand(block: Option<&BatchingSettings>) -> Result<Self> {
        let Some(block) = block else {
            return Ok(Self::default());
        };

        let send_after = match non_empty(block.send_after.as_ref()) {
            Some(value) => parse_duration("batching.send_after", value)?,
            None => DEFAULT_SEND_AFTER,
        };

        Ok(Self {
            enabled: block.enable_batching.unwrap_or(true),
            send_after,
        })
    }
}
