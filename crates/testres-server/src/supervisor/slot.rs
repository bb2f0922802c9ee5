//! Exclusive ownership of the service process handle.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::{debug, warn};

use super::SUPERVISOR_TARGET;
use crate::launcher::ServerProcess;

/// Lifecycle status of the supervised service.
///
/// Every lifecycle call on [`Supervisor`](crate::Supervisor) returns or
/// leaves behind a status that was reconciled with the operating system
/// before control returned to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServerStatus {
    /// No launch has been attempted.
    #[default]
    Idle,
    /// A process is owned and was observed alive.
    Running {
        /// Operating system process identifier.
        pid: u32,
    },
    /// The last launch ended: spawning failed, the process exited, or it was
    /// terminated.
    Stopped {
        /// Exit code, when the process exited normally and it is known.
        exit_code: Option<i32>,
    },
}

impl ServerStatus {
    /// Returns true while the service is presumed running.
    #[must_use]
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// PID of the running service.
    #[must_use]
    pub const fn pid(self) -> Option<u32> {
        match self {
            Self::Running { pid } => Some(pid),
            Self::Idle | Self::Stopped { .. } => None,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => formatter.write_str("idle"),
            Self::Running { pid } => write!(formatter, "running (pid {pid})"),
            Self::Stopped {
                exit_code: Some(code),
            } => write!(formatter, "stopped (exit code {code})"),
            Self::Stopped { exit_code: None } => formatter.write_str("stopped"),
        }
    }
}

/// At most one process handle together with its reconciled status.
#[derive(Debug, Default)]
pub(super) struct ProcessSlot {
    handle: Option<Box<dyn ServerProcess>>,
    status: ServerStatus,
}

impl ProcessSlot {
    pub(super) const fn status(&self) -> ServerStatus {
        self.status
    }

    pub(super) fn handle_mut(&mut self) -> Option<&mut (dyn ServerProcess + 'static)> {
        self.handle.as_deref_mut()
    }

    /// Takes ownership of a freshly launched process.
    ///
    /// The previous handle must already have been reaped.
    pub(super) fn install(&mut self, handle: Box<dyn ServerProcess>) {
        debug_assert!(self.handle.is_none(), "previous process was not reaped");
        self.handle = Some(handle);
    }

    /// Records that process creation failed and nothing is owned.
    pub(super) fn spawn_failed(&mut self) {
        self.handle = None;
        self.status = ServerStatus::Stopped { exit_code: None };
    }

    /// Borrows the slot; reconciliation runs when the guard is dropped.
    pub(super) const fn settle(&mut self) -> Settle<'_> {
        Settle { slot: self }
    }

    /// Aligns the status with the real state of the owned process.
    ///
    /// A live process is reported as running. Anything else is forcibly
    /// terminated, reaped, and released.
    pub(super) fn reconcile(&mut self) -> ServerStatus {
        let Some(handle) = self.handle.as_mut() else {
            if self.status.is_started() {
                self.status = ServerStatus::Stopped { exit_code: None };
            }
            return self.status;
        };
        let pid = handle.id();
        match handle.try_wait() {
            Ok(None) => {
                self.status = ServerStatus::Running { pid };
                self.status
            }
            Ok(Some(exit)) => {
                debug!(
                    target: SUPERVISOR_TARGET,
                    pid,
                    exit_code = ?exit.code(),
                    "service process is no longer alive"
                );
                self.force_stop()
            }
            Err(error) => {
                warn!(
                    target: SUPERVISOR_TARGET,
                    pid,
                    error = %error,
                    "failed to query service process; terminating it"
                );
                self.force_stop()
            }
        }
    }

    /// Forcibly terminates and reaps the owned process, if any.
    pub(super) fn force_stop(&mut self) -> ServerStatus {
        let Some(mut handle) = self.handle.take() else {
            return self.status;
        };
        let pid = handle.id();
        if let Err(error) = handle.kill() {
            warn!(
                target: SUPERVISOR_TARGET,
                pid,
                error = %error,
                "failed to terminate service process"
            );
        }
        let exit_code = match handle.wait() {
            Ok(exit) => exit.code(),
            Err(error) => {
                warn!(
                    target: SUPERVISOR_TARGET,
                    pid,
                    error = %error,
                    "failed to reap service process"
                );
                None
            }
        };
        self.status = ServerStatus::Stopped { exit_code };
        self.status
    }
}

/// Scoped borrow of a [`ProcessSlot`] that reconciles it exactly once when
/// dropped, whichever way the start sequence ends.
pub(super) struct Settle<'a> {
    slot: &'a mut ProcessSlot,
}

impl Deref for Settle<'_> {
    type Target = ProcessSlot;

    fn deref(&self) -> &ProcessSlot {
        self.slot
    }
}

impl DerefMut for Settle<'_> {
    fn deref_mut(&mut self) -> &mut ProcessSlot {
        self.slot
    }
}

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        let status = self.slot.reconcile();
        debug!(
            target: SUPERVISOR_TARGET,
            %status,
            "start sequence settled"
        );
    }
}
