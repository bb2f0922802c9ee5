//! Command-line host for the test resources supervisor.
//!
//! The runtime splits leading configuration flags from the subcommand, loads
//! layered configuration, installs telemetry, and then either prints the
//! composed server command line (`command`) or launches the service
//! (`start`). Configuration loading and the process launcher are injectable
//! so tests can drive the runtime without touching the real environment.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use testres_config::Config;
use testres_server::{Cancellation, ProcessLauncher, Supervisor, SystemLauncher};

mod cli;
mod config;
mod errors;
mod launch;
mod signals;
mod telemetry;

use cli::{Cli, CliCommand};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use config::{command_arguments, split_config_arguments};
pub(crate) use errors::AppError;

/// Tracing target for host events.
pub(crate) const CLI_TARGET: &str = "testres_cli";

/// Exit status reported when a signal cancelled a blocking wait.
const CANCELLED_EXIT: u8 = 130;

/// Runs the CLI with the given arguments and output streams.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cancellation = Cancellation::new();
    if let Err(error) = signals::register(&cancellation) {
        let _ = writeln!(stderr, "{}", AppError::Signals(error));
        return ExitCode::FAILURE;
    }
    let runtime = Runtime {
        loader: &OrthoConfigLoader,
        launcher: SystemLauncher,
        cancellation,
        install_telemetry: true,
    };
    runtime.run(args, stdout, stderr)
}

/// Collaborators used by one CLI invocation.
struct Runtime<'a, C: ConfigLoader, L: ProcessLauncher> {
    loader: &'a C,
    launcher: L,
    cancellation: Cancellation,
    install_telemetry: bool,
}

impl<C, L> Runtime<'_, C, L>
where
    C: ConfigLoader,
    L: ProcessLauncher,
{
    fn run<I, W, E>(self, args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
        W: Write,
        E: Write,
    {
        match self.execute(args, stdout) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) if error.is_cancelled() => {
                let _ = writeln!(stderr, "{error}");
                ExitCode::from(CANCELLED_EXIT)
            }
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                // Help and version output.
                let _ = write!(stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn execute<I, W>(self, args: I, stdout: &mut W) -> Result<(), AppError>
    where
        I: IntoIterator<Item = OsString>,
        W: Write,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli = Cli::try_parse_from(command_arguments(&args, &split))
            .map_err(AppError::CliUsage)?;
        let config = self.loader.load(&split.config_arguments)?;
        if self.install_telemetry {
            telemetry::initialise(&config)?;
        }
        self.dispatch(&cli.command, &config, stdout)
    }

    fn dispatch<W: Write>(
        self,
        command: &CliCommand,
        config: &Config,
        stdout: &mut W,
    ) -> Result<(), AppError> {
        let (launch_args, foreground) = match command {
            CliCommand::Start(start) => (&start.launch, start.foreground),
            CliCommand::Command(launch) => (launch, false),
        };
        let params = launch::process_parameters(launch_args)?;
        let supervisor_config = launch::supervisor_config(config, launch_args, foreground)?;
        let mut supervisor =
            Supervisor::new(supervisor_config, self.launcher, launch::resolver(config))
                .with_cancellation(self.cancellation);
        match command {
            CliCommand::Start(start) => {
                launch::start(&mut supervisor, &params, start, stdout).map(|_| ())
            }
            CliCommand::Command(_) => launch::print_command(&supervisor, &params, stdout),
        }
    }
}

#[cfg(all(test, unix))]
mod tests;
