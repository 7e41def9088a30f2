//! Cancellation token passed from the host into blocking steps.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Shared cancellation flag.
///
/// Clones share state: cancelling any clone cancels them all.
///
/// # Examples
///
/// ```
/// use gprov::CancellationToken;
///
/// let token = CancellationToken::new();
/// let host_side = token.clone();
/// assert!(token.check("credential loading").is_ok());
///
/// host_side.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check("credential loading").is_err());
/// ```
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`Error::Cancelled`] if cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] naming `stage` when the token is
    /// cancelled.
    pub fn check(&self, stage: &str) -> Result<()> {
        if self.is_cancelled() {
            log::debug!("cancellation observed during {stage}");
            return Err(Error::Cancelled {
                stage: stage.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("is_cancelled", &self.is_cancelled())
            .finish()
    }
}
