//! CLI entrypoint for the test resources supervisor.
//!
//! The binary delegates to [`testres_cli::run`], which loads configuration,
//! installs telemetry, and drives the supervisor.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    testres_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
