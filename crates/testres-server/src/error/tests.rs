//! Unit tests for supervisor error types.

use std::io;
use std::sync::Arc;

use rstest::rstest;

use super::*;

#[test]
fn compose_errors_convert_into_supervisor_errors() {
    let error = SupervisorError::from(ComposeError::MissingMainClass);
    assert!(matches!(
        error,
        SupervisorError::Compose(ComposeError::MissingMainClass)
    ));
    let message = error.to_string();
    assert!(
        message.contains("main class is not set"),
        "expected compose detail in message: {message}"
    );
}

#[test]
fn spawn_error_message_includes_command() {
    let error = SupervisorError::Spawn {
        command: String::from("/usr/bin/java -cp a.jar com.example.MyApp"),
        source: Arc::new(io::Error::from(io::ErrorKind::NotFound)),
    };
    let message = error.to_string();
    assert!(
        message.contains("/usr/bin/java -cp a.jar com.example.MyApp"),
        "expected command in message: {message}"
    );
}

#[rstest]
#[case::already_running(SupervisorError::AlreadyRunning { pid: 4242 }, "4242")]
#[case::wait(
    SupervisorError::Wait {
        pid: 77,
        source: Arc::new(io::Error::other("interrupted")),
    },
    "77"
)]
fn error_message_includes_pid(#[case] error: SupervisorError, #[case] expected: &str) {
    let message = error.to_string();
    assert!(
        message.contains(expected),
        "expected {expected} in message: {message}"
    );
}

#[test]
fn only_cancellation_reports_cancelled() {
    assert!(SupervisorError::Cancelled.is_cancelled());
    assert!(!SupervisorError::AlreadyRunning { pid: 1 }.is_cancelled());
    assert!(!SupervisorError::from(ComposeError::MissingExecutable).is_cancelled());
}

#[test]
fn supervisor_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SupervisorError>();
}

#[test]
fn non_utf8_path_message_names_the_path() {
    let error = ComposeError::NonUtf8Path {
        path: std::path::PathBuf::from("/opt/lib/server.jar"),
    };
    assert_eq!(
        error.to_string(),
        "path /opt/lib/server.jar is not valid UTF-8"
    );
}
