//! Errors raised while composing and supervising the service process.
//!
//! I/O errors are wrapped in `Arc` to keep the enums small and `Send + Sync`.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Configuration problems detected before any token is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// No runnable Java executable could be resolved.
    #[error("Java executable not found")]
    MissingExecutable,
    /// The process parameters did not name a main class.
    #[error("main class is not set")]
    MissingMainClass,
    /// The executable or a classpath entry cannot be passed through as text.
    #[error("path {} is not valid UTF-8", .path.display())]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },
}

/// Errors surfaced by [`Supervisor`](crate::Supervisor) lifecycle calls.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The command line could not be composed; nothing was spawned.
    #[error("invalid server configuration: {0}")]
    Compose(#[from] ComposeError),

    /// A previously started server is still alive.
    #[error("test resources service already running with pid {pid}")]
    AlreadyRunning {
        /// PID of the live server.
        pid: u32,
    },

    /// The operating system refused to create the process.
    #[error("failed to start server with command `{command}`: {source}")]
    Spawn {
        /// Rendered command line that was attempted.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// Polling the child process for its exit status failed.
    #[error("failed to wait for server pid {pid}: {source}")]
    Wait {
        /// PID of the server being waited on.
        pid: u32,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A blocking wait was cancelled by the caller.
    #[error("wait for the test resources service was cancelled")]
    Cancelled,
}

impl SupervisorError {
    /// Returns true when the error reports cooperative cancellation rather
    /// than a failure.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests;
