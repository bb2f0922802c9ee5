//! Process creation seam used by the supervisor.
//!
//! [`SystemLauncher`] spawns the service with `std::process::Command`,
//! connecting its standard streams directly to the parent's so server output
//! is visible live without buffering. Tests implement [`ProcessLauncher`] to
//! script process behaviour or to assert that nothing was spawned.

use std::fmt;
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};

use tracing::debug;

use crate::compose::CommandLine;

/// Tracing target for launcher operations.
const LAUNCHER_TARGET: &str = "testres_server::launcher";

/// Handle to a launched service process.
///
/// The supervisor is the only owner of a handle; no other component waits on
/// or terminates it.
pub trait ServerProcess: fmt::Debug + Send {
    /// Operating system process identifier.
    fn id(&self) -> u32;

    /// Polls for exit without blocking, reaping the process if it has exited.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the status cannot be queried.
    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>>;

    /// Forcibly terminates the process.
    ///
    /// Terminating a process that has already exited succeeds.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the signal cannot be delivered.
    fn kill(&mut self) -> io::Result<()>;

    /// Blocks until the process exits and reaps it.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when waiting fails.
    fn wait(&mut self) -> io::Result<ExitStatus>;
}

/// Creates service processes from composed command lines.
///
/// # Example
///
/// ```
/// use std::io;
///
/// use testres_server::{CommandLine, ProcessLauncher, ServerProcess};
///
/// struct RefusingLauncher;
///
/// impl ProcessLauncher for RefusingLauncher {
///     fn launch(&self, _command: &CommandLine) -> io::Result<Box<dyn ServerProcess>> {
///         Err(io::Error::from(io::ErrorKind::PermissionDenied))
///     }
/// }
/// ```
pub trait ProcessLauncher {
    /// Spawns a process running `command`.
    ///
    /// # Errors
    ///
    /// Returns the operating system error when the process cannot be created.
    fn launch(&self, command: &CommandLine) -> io::Result<Box<dyn ServerProcess>>;
}

impl<L: ProcessLauncher + ?Sized> ProcessLauncher for &L {
    fn launch(&self, command: &CommandLine) -> io::Result<Box<dyn ServerProcess>> {
        (**self).launch(command)
    }
}

/// Launches processes with `std::process::Command` and inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &CommandLine) -> io::Result<Box<dyn ServerProcess>> {
        let mut process = Command::new(command.program());
        process
            .args(command.arguments())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let child = process.spawn()?;
        debug!(
            target: LAUNCHER_TARGET,
            pid = child.id(),
            program = command.program(),
            "spawned service process"
        );
        Ok(Box::new(SystemProcess { child }))
    }
}

/// [`ServerProcess`] backed by a `std::process::Child`.
#[derive(Debug)]
struct SystemProcess {
    child: Child,
}

impl ServerProcess for SystemProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    fn kill(&mut self) -> io::Result<()> {
        match self.child.kill() {
            Err(error) if error.kind() == io::ErrorKind::InvalidInput => Ok(()),
            other => other,
        }
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }
}

#[cfg(all(test, unix))]
mod tests;
