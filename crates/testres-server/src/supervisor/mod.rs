//! Lifecycle management for the test resources service process.

mod slot;
mod wait;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

pub use self::slot::ServerStatus;
use self::slot::ProcessSlot;
use self::wait::{WaitOutcome, wait_until};
use crate::cancel::Cancellation;
use crate::compose::{CommandLine, compose};
use crate::error::{ComposeError, SupervisorError};
use crate::launcher::ProcessLauncher;
use crate::parameters::{ProcessParameters, SupervisorConfig};
use crate::resolver::JavaResolver;

/// Tracing target for supervisor lifecycle events.
pub(crate) const SUPERVISOR_TARGET: &str = "testres_server::supervisor";

/// Owns at most one service process and keeps its status honest.
///
/// Lifecycle calls take `&mut self`: one caller drives the supervisor at a
/// time, while [`Cancellation`] tokens obtained from
/// [`Supervisor::cancellation`] may be triggered from any thread.
///
/// Dropping the supervisor leaves a background server running; call
/// [`Supervisor::stop`] to terminate it.
#[derive(Debug)]
pub struct Supervisor<L, R> {
    config: SupervisorConfig,
    launcher: L,
    resolver: R,
    slot: ProcessSlot,
    cancellation: Cancellation,
}

impl<L, R> Supervisor<L, R>
where
    L: ProcessLauncher,
    R: JavaResolver,
{
    /// Creates an idle supervisor.
    #[must_use]
    pub fn new(config: SupervisorConfig, launcher: L, resolver: R) -> Self {
        Self {
            config,
            launcher,
            resolver,
            slot: ProcessSlot::default(),
            cancellation: Cancellation::new(),
        }
    }

    /// Uses an externally owned cancellation token, such as one wired to
    /// signal handlers.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Supervisor-level configuration.
    #[must_use]
    pub const fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Token that interrupts blocking waits when cancelled.
    #[must_use]
    pub const fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }

    /// Status observed when the last lifecycle call settled.
    ///
    /// Use [`Supervisor::poll_status`] to re-check a background server.
    #[must_use]
    pub const fn status(&self) -> ServerStatus {
        self.slot.status()
    }

    /// Returns true while the service is presumed running.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.slot.status().is_started()
    }

    /// PID of the running service, if any.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.slot.status().pid()
    }

    /// Composes the command line `start` would run, without spawning.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError`] when no Java executable resolves or the main
    /// class is missing.
    pub fn command_line(&self, params: &ProcessParameters) -> Result<CommandLine, ComposeError> {
        let executable = self.resolver.resolve();
        compose(executable.as_deref(), params, &self.config)
    }

    /// Launches the service.
    ///
    /// In background mode this returns once the process exists, reporting
    /// [`ServerStatus::Running`] if it was still alive at that point. In
    /// foreground mode it blocks until the process exits or the cancellation
    /// token fires.
    ///
    /// Whichever way the call ends, a process that is no longer alive is
    /// forcibly terminated and reaped before returning, and the status
    /// reflects that.
    ///
    /// # Errors
    ///
    /// - [`SupervisorError::AlreadyRunning`] when a previous server is alive.
    /// - [`SupervisorError::Compose`] when the command line is invalid; no
    ///   process is spawned.
    /// - [`SupervisorError::Spawn`] when the operating system refuses the
    ///   command.
    /// - [`SupervisorError::Wait`] when polling a foreground server fails.
    /// - [`SupervisorError::Cancelled`] when a foreground wait is cancelled;
    ///   the server keeps running.
    pub fn start(&mut self, params: &ProcessParameters) -> Result<ServerStatus, SupervisorError> {
        if let ServerStatus::Running { pid } = self.slot.reconcile() {
            return Err(SupervisorError::AlreadyRunning { pid });
        }
        info!(
            target: SUPERVISOR_TARGET,
            version = self.config.service_version(),
            "Starting test resources service, version {}",
            self.config.service_version()
        );
        let command = self.command_line(params)?;
        debug!(
            target: SUPERVISOR_TARGET,
            command = %command,
            "composed service command line"
        );
        self.launch_and_settle(&command)?;
        Ok(self.slot.status())
    }

    fn launch_and_settle(&mut self, command: &CommandLine) -> Result<(), SupervisorError> {
        let mut slot = self.slot.settle();
        let handle = match self.launcher.launch(command) {
            Ok(handle) => handle,
            Err(source) => {
                error!(
                    target: SUPERVISOR_TARGET,
                    command = %command,
                    error = %source,
                    "failed to start test resources service"
                );
                slot.spawn_failed();
                return Err(SupervisorError::Spawn {
                    command: command.to_string(),
                    source: Arc::new(source),
                });
            }
        };
        let pid = handle.id();
        slot.install(handle);
        if !self.config.foreground() {
            info!(target: SUPERVISOR_TARGET, pid, "test resources service started");
            return Ok(());
        }
        info!(
            target: SUPERVISOR_TARGET,
            pid,
            "test resources service started in foreground. Press Ctrl+C to stop."
        );
        let Some(process) = slot.handle_mut() else {
            return Ok(());
        };
        match wait_until(process, None, &self.cancellation) {
            Ok(WaitOutcome::Exited(exit)) => {
                info!(
                    target: SUPERVISOR_TARGET,
                    pid,
                    exit_code = ?exit.code(),
                    "test resources service exited"
                );
                Ok(())
            }
            Ok(WaitOutcome::Cancelled) => {
                info!(target: SUPERVISOR_TARGET, pid, "foreground wait cancelled");
                Err(SupervisorError::Cancelled)
            }
            Ok(WaitOutcome::TimedOut) => Ok(()),
            Err(source) => {
                slot.force_stop();
                Err(SupervisorError::Wait {
                    pid,
                    source: Arc::new(source),
                })
            }
        }
    }

    /// Blocks until the owned process exits or `duration` elapses.
    ///
    /// Returns immediately when nothing is owned. A timeout is not an error.
    /// The status is left untouched; follow up with
    /// [`Supervisor::poll_status`] to observe an exit.
    ///
    /// # Errors
    ///
    /// - [`SupervisorError::Cancelled`] when the cancellation token fires.
    /// - [`SupervisorError::Wait`] when polling the process fails.
    pub fn wait_for(&mut self, duration: Duration) -> Result<(), SupervisorError> {
        let Some(process) = self.slot.handle_mut() else {
            return Ok(());
        };
        let pid = process.id();
        let deadline = Instant::now().checked_add(duration);
        debug!(
            target: SUPERVISOR_TARGET,
            pid,
            timeout = ?duration,
            "waiting for service process"
        );
        match wait_until(process, deadline, &self.cancellation) {
            Ok(WaitOutcome::Exited(_) | WaitOutcome::TimedOut) => Ok(()),
            Ok(WaitOutcome::Cancelled) => Err(SupervisorError::Cancelled),
            Err(source) => Err(SupervisorError::Wait {
                pid,
                source: Arc::new(source),
            }),
        }
    }

    /// Re-checks the owned process and returns the reconciled status.
    ///
    /// A process found dead is reaped and released.
    pub fn poll_status(&mut self) -> ServerStatus {
        self.slot.reconcile()
    }

    /// Forcibly terminates and reaps the owned process.
    ///
    /// Without an owned process this is a no-op returning the current status.
    pub fn stop(&mut self) -> ServerStatus {
        let status = self.slot.force_stop();
        debug!(target: SUPERVISOR_TARGET, %status, "stop requested");
        status
    }
}
