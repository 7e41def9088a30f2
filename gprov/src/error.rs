//! Error types for the gprov library.
//!
//! Every failure the configuration engine can produce is a variant of
//! [`Error`]. Assembly is first-failure: the first error encountered is
//! returned and no partial configuration is produced.

use thiserror::Error;

/// Result type alias for operations that may fail with a gprov error.
///
/// # Examples
///
/// ```
/// use gprov::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("us-central1")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the gprov library.
#[derive(Debug, Error)]
pub enum Error {
    /// A settings field failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A duration string could not be parsed.
    #[error("invalid duration for '{field}': {value:?} ({reason})")]
    InvalidDuration {
        /// The field holding the duration.
        field: String,
        /// The rejected value.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The attribution label addition strategy is not a known value.
    #[error(
        "unrecognized attribution label addition strategy {value:?} (expected CREATION_ONLY or PROACTIVE)"
    )]
    InvalidAttributionStrategy {
        /// The rejected value.
        value: String,
    },

    /// A universe domain was declared but the credentials carry none.
    #[error(
        "universe domain mismatch: '{declared}' was supplied in the provider configuration but the \
         credentials carry no universe domain; credentials without one are assumed to be in the \
         default universe 'googleapis.com'"
    )]
    UniverseDomainUnmatched {
        /// The domain declared in the settings.
        declared: String,
    },

    /// The declared universe domain differs from the credential domain.
    #[error(
        "universe domain mismatch: the credentials are in universe '{implied}' but '{declared}' \
         was supplied in the provider configuration; the two must match"
    )]
    UniverseDomainMismatch {
        /// The domain declared in the settings.
        declared: String,
        /// The domain implied by the loaded credentials.
        implied: String,
    },

    /// The credentials carry a non-default universe domain that was not declared.
    #[error(
        "universe domain mismatch: universe domain '{implied}' was found in the credentials but no \
         universe_domain is set in the provider configuration (declared: none); set it to \
         '{implied}' or use different credentials"
    )]
    UniverseDomainUndeclared {
        /// The domain implied by the loaded credentials.
        implied: String,
    },

    /// Credential loading failed. The message is passed through unmodified.
    #[error("{source}")]
    CredentialLoad {
        /// The underlying error from the credential loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The host cancelled the operation.
    #[error("operation cancelled during {stage}")]
    Cancelled {
        /// The step that observed the cancellation.
        stage: String,
    },

    /// Merged operation registries contained duplicate keys.
    #[error("saw duplicates in merged operation registries: {keys:?}")]
    DuplicateOperations {
        /// Every duplicated key, in encounter order.
        keys: Vec<String>,
    },

    /// A settings or registry file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an arbitrary error as a credential-load failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use gprov::Error;
    ///
    /// let err = Error::credential_load("token expired");
    /// assert_eq!(err.to_string(), "token expired");
    /// ```
    pub fn credential_load<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::CredentialLoad { source: err.into() }
    }

    /// Check if the error stems from malformed user input.
    ///
    /// # Examples
    ///
    /// ```
    /// use gprov::Error;
    ///
    /// let err = Error::InvalidAttributionStrategy { value: "bogus".into() };
    /// assert!(err.is_malformed_input());
    /// ```
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidDuration { .. }
                | Self::InvalidAttributionStrategy { .. }
        )
    }

    /// Check if the error is a universe domain mismatch of any shape.
    #[must_use]
    pub fn is_universe_domain_mismatch(&self) -> bool {
        matches!(
            self,
            Self::UniverseDomainUnmatched { .. }
                | Self::UniverseDomainMismatch { .. }
                | Self::UniverseDomainUndeclared { .. }
        )
    }

    /// Check if the error came from credential loading, including cancellation.
    #[must_use]
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::CredentialLoad { .. } | Self::Cancelled { .. })
    }
}
