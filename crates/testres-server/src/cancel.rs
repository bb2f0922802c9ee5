//! Cooperative cancellation for blocking waits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable cancellation token shared between a supervisor and its host.
///
/// Blocking waits check the token between polls of the child process and
/// return [`SupervisorError::Cancelled`](crate::SupervisorError::Cancelled)
/// once it is set. The token stays set after a cancelled wait so callers can
/// observe it; call [`Cancellation::reset`] before waiting again.
///
/// # Example
///
/// ```
/// use testres_server::Cancellation;
///
/// let token = Cancellation::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// token.reset();
/// assert!(!handle.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of any in-flight wait.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clears a previous cancellation request.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Shared flag backing the token, suitable for signal handler
    /// registration.
    #[must_use]
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}
