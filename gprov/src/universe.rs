//! Universe domain reconciliation.

use crate::endpoints::DEFAULT_UNIVERSE_DOMAIN;
use crate::error::{Error, Result};

/// Cross-check a declared universe domain against the one implied by the
/// loaded credentials.
///
/// `declared` is the settings value (`None` or empty means unset) and
/// `implied` the credential domain (empty means the default). On success
/// returns the resolved domain: empty for the default universe, otherwise
/// the non-default domain both sides agree on.
///
/// # Errors
///
/// Returns one of the universe-domain mismatch errors when the two sides
/// disagree.
///
/// # Examples
///
/// ```
/// use gprov::universe::validate_universe_domain;
///
/// assert_eq!(validate_universe_domain(Some("example.com"), "example.com").unwrap(), "example.com");
/// assert_eq!(validate_universe_domain(None, "").unwrap(), "");
/// assert!(validate_universe_domain(Some("example.com"), "").is_err());
/// assert!(validate_universe_domain(None, "example.com").is_err());
/// ```
pub fn validate_universe_domain(declared: Option<&str>, implied: &str) -> Result<String> {
    let declared = declared.filter(|d| !d.is_empty());

    match declared {
        Some(declared) if implied.is_empty() => {
            if declared == DEFAULT_UNIVERSE_DOMAIN {
                Ok(String::new())
            } else {
                Err(Error::UniverseDomainUnmatched {
                    declared: declared.to_string(),
                })
            }
        }
        Some(declared) => {
            if declared != implied {
                return Err(Error::UniverseDomainMismatch {
                    declared: declared.to_string(),
                    implied: implied.to_string(),
                });
            }
            Ok(normalize(declared))
        }
        None => {
            if implied.is_empty() || implied == DEFAULT_UNIVERSE_DOMAIN {
                Ok(String::new())
            } else {
                Err(Error::UniverseDomainUndeclared {
                    implied: implied.to_string(),
                })
            }
        }
    }
}

fn normalize(domain: &str) -> String {
    if domain == DEFAULT_UNIVERSE_DOMAIN {
        String::new()
    } else {
        domain.to_string()
    }
}
