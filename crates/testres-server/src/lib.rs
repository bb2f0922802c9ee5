//! Out-of-process supervisor for the test resources service.
//!
//! The `testres-server` crate launches the test resources service as a child
//! JVM, keeps track of whether it is alive, optionally blocks until it exits,
//! and terminates it on demand. It is split into two layers:
//!
//! - The **argument composer** ([`compose`]) is a pure function that turns
//!   [`ProcessParameters`] and a [`SupervisorConfig`] into an ordered
//!   [`CommandLine`]. Its ordering is part of the public contract: JVM
//!   arguments, the optional debug agent, per-call system properties,
//!   supervisor-level system properties, the classpath, the main class, and
//!   finally the program arguments.
//! - The **supervisor** ([`Supervisor`]) owns the child process handle and
//!   reconciles its [`ServerStatus`] with the real process state whenever a
//!   lifecycle call settles, so the status a caller reads is never stale.
//!
//! Process creation goes through the [`ProcessLauncher`] seam and executable
//! discovery through the [`JavaResolver`] seam, so hosts and tests can inject
//! their own implementations.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use testres_server::{
//!     ProcessParameters, Supervisor, SupervisorConfig, SystemJavaResolver, SystemLauncher,
//! };
//!
//! let config = SupervisorConfig::new("2.6.0");
//! let mut supervisor = Supervisor::new(config, SystemLauncher, SystemJavaResolver::default());
//! let params = ProcessParameters::new("io.micronaut.testresources.server.TestResourcesService")
//!     .with_classpath_entry("/opt/test-resources/server.jar");
//! let status = supervisor.start(&params).expect("server starts");
//! assert!(status.is_started());
//! supervisor.wait_for(Duration::from_secs(1)).expect("wait completes");
//! let stopped = supervisor.stop();
//! assert!(!stopped.is_started());
//! ```

mod cancel;
pub mod compose;
mod error;
pub mod launcher;
mod parameters;
pub mod resolver;
mod supervisor;

#[cfg(all(test, unix))]
mod tests;

pub use self::cancel::Cancellation;
pub use self::compose::{
    CLASSPATH_FLAG, CommandLine, DEBUG_AGENT_ARGUMENT, DEBUG_PORT, PATH_SEPARATOR, compose,
};
pub use self::error::{ComposeError, SupervisorError};
pub use self::launcher::{ProcessLauncher, ServerProcess, SystemLauncher};
pub use self::parameters::{ProcessParameters, SupervisorConfig, SystemProperties};
pub use self::resolver::{JavaResolver, SystemJavaResolver};
pub use self::supervisor::{ServerStatus, Supervisor};
