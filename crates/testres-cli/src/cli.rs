//! CLI argument definitions for the `testres` host.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line interface for launching the test resources service.
#[derive(Parser, Debug)]
#[command(name = "testres", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Lifecycle command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the `testres` CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Starts the service and reports its status.
    Start(StartArgs),
    /// Prints the command line `start` would run without spawning anything.
    Command(LaunchArgs),
}

/// Options accepted by `start`.
#[derive(Args, Debug, Clone)]
pub(crate) struct StartArgs {
    /// Blocks until the service exits instead of returning after launch.
    #[arg(long)]
    pub(crate) foreground: bool,
    /// Waits up to this many seconds for a background service to exit.
    #[arg(long, value_name = "SECONDS")]
    pub(crate) wait_secs: Option<u64>,
    /// Launch parameters shared with `command`.
    #[command(flatten)]
    pub(crate) launch: LaunchArgs,
}

/// Parameters describing one service launch.
#[derive(Args, Debug, Clone)]
pub(crate) struct LaunchArgs {
    /// Exposes a JDWP debug agent on port 8000.
    #[arg(long)]
    pub(crate) debug: bool,
    /// Entry point of the service.
    #[arg(long, value_name = "CLASS")]
    pub(crate) main_class: String,
    /// Classpath entry; repeat to add more, order is preserved.
    #[arg(long = "classpath", value_name = "PATH")]
    pub(crate) classpath: Vec<PathBuf>,
    /// Argument passed verbatim to the JVM; repeat to add more.
    #[arg(long = "jvm-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub(crate) jvm_arguments: Vec<String>,
    /// System property for this launch, as `name=value`.
    #[arg(short = 'D', value_name = "NAME=VALUE")]
    pub(crate) system_properties: Vec<String>,
    /// Arguments passed to the service after the main class.
    #[arg(last = true, value_name = "ARG")]
    pub(crate) program_arguments: Vec<String>,
}
