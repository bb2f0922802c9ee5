//! Unit tests for the system launcher, driving real shell processes.

use std::path::Path;

use super::*;
use crate::compose::compose;
use crate::parameters::{ProcessParameters, SupervisorConfig};

fn shell_command(script: &str) -> CommandLine {
    // `sh -c <script> <name>` places the composed tokens after the script,
    // where the shell ignores them as positional parameters.
    let params = ProcessParameters::new("Main").with_jvm_arguments(["-c", script, "testres"]);
    compose(Some(Path::new("/bin/sh")), &params, &SupervisorConfig::default())
        .expect("compose succeeds")
}

#[test]
fn launches_and_reaps_process() {
    let mut process = SystemLauncher
        .launch(&shell_command("exit 3"))
        .expect("spawn succeeds");
    assert!(process.id() > 0);
    let status = process.wait().expect("wait succeeds");
    assert_eq!(status.code(), Some(3));
}

#[test]
fn kill_is_idempotent_after_exit() {
    let mut process = SystemLauncher
        .launch(&shell_command("exit 0"))
        .expect("spawn succeeds");
    process.wait().expect("wait succeeds");
    process.kill().expect("killing an exited process succeeds");
    process.kill().expect("repeated kill succeeds");
}

#[test]
fn kill_terminates_running_process() {
    let mut process = SystemLauncher
        .launch(&shell_command("sleep 30"))
        .expect("spawn succeeds");
    assert!(process.try_wait().expect("poll succeeds").is_none());
    process.kill().expect("kill succeeds");
    let status = process.wait().expect("wait succeeds");
    assert!(!status.success());
}

#[test]
fn missing_program_reports_not_found() {
    let params = ProcessParameters::new("Main");
    let command = compose(
        Some(Path::new("/nonexistent/testres/java")),
        &params,
        &SupervisorConfig::default(),
    )
    .expect("compose succeeds");
    let error = SystemLauncher.launch(&command).expect_err("spawn should fail");
    assert_eq!(error.kind(), io::ErrorKind::NotFound);
}
