//! Crate-level test support and end-to-end supervisor tests.

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use mockall::mock;

use crate::compose::CommandLine;
use crate::launcher::{ProcessLauncher, ServerProcess, SystemLauncher};
use crate::parameters::{ProcessParameters, SupervisorConfig};
use crate::supervisor::{ServerStatus, Supervisor};

mock! {
    pub Launcher {}
    impl ProcessLauncher for Launcher {
        fn launch(&self, command: &CommandLine) -> io::Result<Box<dyn ServerProcess>>;
    }
}

/// Raw wait status of a process killed by `SIGKILL`.
const SIGKILL_STATUS: i32 = 9;

/// Observable state behind a [`FakeProcess`].
#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub(crate) alive: bool,
    pub(crate) exit_code: i32,
    pub(crate) killed: usize,
    pub(crate) reaped: usize,
    pub(crate) fail_try_wait: bool,
}

/// Scripted [`ServerProcess`] whose state is shared with the test.
#[derive(Debug, Clone)]
pub(crate) struct FakeProcess {
    pid: u32,
    state: Arc<Mutex<FakeState>>,
}

impl FakeProcess {
    /// A process that is alive until killed or told to exit.
    pub(crate) fn running(pid: u32) -> Self {
        Self::with_state(
            pid,
            FakeState {
                alive: true,
                ..FakeState::default()
            },
        )
    }

    /// A process that exited with `exit_code` before anyone looked.
    pub(crate) fn exited(pid: u32, exit_code: i32) -> Self {
        Self::with_state(
            pid,
            FakeState {
                exit_code,
                ..FakeState::default()
            },
        )
    }

    fn with_state(pid: u32, state: FakeState) -> Self {
        Self {
            pid,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake process state lock")
    }

    /// Simulates the process exiting on its own.
    pub(crate) fn exit(&self, exit_code: i32) {
        let mut state = self.state();
        state.alive = false;
        state.exit_code = exit_code;
    }

    fn exit_status(state: &FakeState) -> ExitStatus {
        if state.killed > 0 {
            ExitStatus::from_raw(SIGKILL_STATUS)
        } else {
            ExitStatus::from_raw(state.exit_code << 8)
        }
    }
}

impl ServerProcess for FakeProcess {
    fn id(&self) -> u32 {
        self.pid
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        let state = self.state();
        if state.fail_try_wait {
            return Err(io::Error::other("process table unavailable"));
        }
        Ok((!state.alive).then(|| Self::exit_status(&state)))
    }

    fn kill(&mut self) -> io::Result<()> {
        let mut state = self.state();
        if state.alive {
            state.killed += 1;
            state.alive = false;
        }
        Ok(())
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        let mut state = self.state();
        state.alive = false;
        state.reaped += 1;
        Ok(Self::exit_status(&state))
    }
}

pub(crate) fn boxed(process: FakeProcess) -> Box<dyn ServerProcess> {
    Box::new(process)
}

/// Launcher that hands out `process` exactly once.
pub(crate) fn launcher_returning(process: &FakeProcess) -> MockLauncher {
    let handle = boxed(process.clone());
    let mut launcher = MockLauncher::new();
    launcher
        .expect_launch()
        .once()
        .return_once(move |_command| Ok(handle));
    launcher
}

/// Resolver answering with a fixed, nonexistent Java path.
pub(crate) fn java() -> Option<PathBuf> {
    Some(PathBuf::from("/usr/lib/jvm/bin/java"))
}

/// Parameters that make `/bin/sh` run `script`, ignoring the composed tail.
fn shell_params(script: &str) -> ProcessParameters {
    ProcessParameters::new("Main").with_jvm_arguments(["-c", script, "testres"])
}

fn shell_supervisor(config: SupervisorConfig) -> Supervisor<SystemLauncher, Option<PathBuf>> {
    Supervisor::new(config, SystemLauncher, Some(PathBuf::from("/bin/sh")))
}

#[test]
fn background_server_runs_until_stopped() {
    let mut supervisor = shell_supervisor(SupervisorConfig::new("1.0"));
    let status = supervisor
        .start(&shell_params("exec sleep 30"))
        .expect("start succeeds");
    assert!(status.is_started());
    assert_eq!(supervisor.pid(), status.pid());

    supervisor
        .wait_for(Duration::from_millis(100))
        .expect("wait completes");
    assert!(supervisor.poll_status().is_started());

    let stopped = supervisor.stop();
    assert!(matches!(stopped, ServerStatus::Stopped { exit_code: None }));
    assert!(!supervisor.is_started());
}

#[test]
fn foreground_server_reports_exit_code() {
    let config = SupervisorConfig::new("1.0").with_foreground(true);
    let mut supervisor = shell_supervisor(config);
    let status = supervisor
        .start(&shell_params("exit 7"))
        .expect("start succeeds");
    assert_eq!(status, ServerStatus::Stopped { exit_code: Some(7) });
}

#[test]
fn exited_background_server_is_observed_after_wait() {
    let mut supervisor = shell_supervisor(SupervisorConfig::new("1.0"));
    supervisor
        .start(&shell_params("sleep 0.2; exit 4"))
        .expect("start succeeds");
    supervisor
        .wait_for(Duration::from_secs(10))
        .expect("wait completes");
    assert_eq!(
        supervisor.poll_status(),
        ServerStatus::Stopped { exit_code: Some(4) }
    );
}

#[test]
fn missing_program_is_reported_as_spawn_failure() {
    let mut supervisor = Supervisor::new(
        SupervisorConfig::new("1.0"),
        SystemLauncher,
        Some(PathBuf::from("/nonexistent/testres/java")),
    );
    let error = supervisor
        .start(&ProcessParameters::new("Main"))
        .expect_err("spawn should fail");
    assert!(matches!(error, crate::SupervisorError::Spawn { .. }));
    assert_eq!(supervisor.status(), ServerStatus::Stopped { exit_code: None });
}
