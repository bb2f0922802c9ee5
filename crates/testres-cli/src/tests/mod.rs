//! Runtime tests driving the CLI with stub configuration and a scripted
//! Java installation.

use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::ExitCode;

use rstest::{fixture, rstest};
use tempfile::TempDir;
use testres_config::Config;
use testres_server::{Cancellation, DEBUG_AGENT_ARGUMENT, SystemLauncher};

use crate::{AppError, ConfigLoader, Runtime};

/// Loader returning a fixed configuration.
struct StubLoader(Config);

impl ConfigLoader for StubLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.0.clone())
    }
}

/// Java home whose `bin/java` is a shell script.
pub(crate) struct FakeJava {
    _dir: TempDir,
    pub(crate) home: PathBuf,
}

impl FakeJava {
    pub(crate) fn with_script(body: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let home = dir.path().join("jdk");
        let bin = home.join("bin");
        fs::create_dir_all(&bin).expect("create bin directory");
        let java = bin.join("java");
        fs::write(&java, format!("#!/bin/sh\n{body}\n")).expect("write java script");
        fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).expect("make executable");
        Self { _dir: dir, home }
    }

    pub(crate) fn executable(&self) -> PathBuf {
        self.home.join("bin").join("java")
    }

    pub(crate) fn config(&self) -> Config {
        let home = self.home.to_str().expect("temp path is UTF-8");
        Config::default().with_java_home(home)
    }
}

struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_with(config: Config, cancellation: Cancellation, args: &[&str]) -> Outcome {
    let loader = StubLoader(config);
    let runtime = Runtime {
        loader: &loader,
        launcher: SystemLauncher,
        cancellation,
        install_telemetry: false,
    };
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let arguments = std::iter::once("testres")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = runtime.run(arguments, &mut stdout, &mut stderr);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout is UTF-8"),
        stderr: String::from_utf8(stderr).expect("stderr is UTF-8"),
    }
}

fn run(config: Config, args: &[&str]) -> Outcome {
    run_with(config, Cancellation::new(), args)
}

#[fixture]
fn java() -> FakeJava {
    FakeJava::with_script("exit 0")
}

#[rstest]
fn command_prints_composed_line(java: FakeJava) {
    let outcome = run(
        java.config().with_system_property("foo=baz"),
        &[
            "command",
            "--main-class",
            "com.example.MyApp",
            "--classpath",
            "/a/x.jar",
            "--classpath",
            "/a/y.jar",
            "-D",
            "foo=bar",
            "--",
            "serve",
        ],
    );

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    let expected = format!(
        "{} -Dfoo=bar -Dfoo=baz -cp /a/x.jar:/a/y.jar com.example.MyApp serve\n",
        java.executable().display()
    );
    assert_eq!(outcome.stdout, expected);
}

#[rstest]
fn command_with_debug_includes_agent(java: FakeJava) {
    let outcome = run(
        java.config(),
        &["command", "--debug", "--jvm-arg", "-Xmx64m", "--main-class", "Main"],
    );

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert!(
        outcome
            .stdout
            .contains(&format!("-Xmx64m {DEBUG_AGENT_ARGUMENT} -cp")),
        "unexpected output: {}",
        outcome.stdout
    );
}

#[rstest]
fn relative_classpath_entries_become_absolute(java: FakeJava) {
    let outcome = run(
        java.config(),
        &["command", "--main-class", "Main", "--classpath", "lib/server.jar"],
    );

    let cwd = std::env::current_dir().expect("current dir");
    let expected = cwd.join("lib/server.jar");
    assert!(
        outcome.stdout.contains(&expected.display().to_string()),
        "unexpected output: {}",
        outcome.stdout
    );
}

#[rstest]
#[case::cli_property(Config::default(), &["command", "--main-class", "Main", "-D", "broken"])]
#[case::configured_property(
    Config::default().with_system_property("=nameless"),
    &["command", "--main-class", "Main"]
)]
fn malformed_properties_fail(#[case] base: Config, #[case] args: &[&str], java: FakeJava) {
    let home = java.home.to_str().expect("temp path is UTF-8");
    let outcome = run(base.with_java_home(home), args);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("invalid system property"));
}

#[rstest]
fn missing_main_class_is_a_usage_error(java: FakeJava) {
    let outcome = run(java.config(), &["start"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("--main-class"));
}

#[test]
fn help_goes_to_stdout() {
    let outcome = run(Config::default(), &["--help"]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("start"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn foreground_start_reports_exit_code() {
    let java = FakeJava::with_script("exit 3");
    let outcome = run(java.config(), &["start", "--foreground", "--main-class", "Main"]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "test resources service stopped (exit code 3)\n");
}

#[test]
fn background_start_waits_when_asked() {
    let java = FakeJava::with_script("sleep 0.1; exit 0");
    let outcome = run(
        java.config(),
        &["start", "--wait-secs", "20", "--main-class", "Main"],
    );

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "test resources service stopped (exit code 0)\n");
}

#[test]
fn cancelled_foreground_start_exits_with_interrupt_status() {
    let java = FakeJava::with_script("exec sleep 2");
    let cancellation = Cancellation::new();
    cancellation.cancel();

    let outcome = run_with(
        java.config(),
        cancellation,
        &["start", "--foreground", "--main-class", "Main"],
    );

    assert_eq!(outcome.exit, ExitCode::from(130));
    assert!(outcome.stderr.contains("cancelled"));
}

#[test]
fn signal_errors_render_with_context() {
    let error = AppError::Signals(std::io::Error::other("denied"));
    assert_eq!(error.to_string(), "failed to install signal handlers: denied");
}
