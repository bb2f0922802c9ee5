//! Maps CLI input and configuration onto supervisor calls.

use std::io::Write;
use std::path::{self, PathBuf};
use std::time::Duration;

use testres_config::{Config, properties::parse_property};
use testres_server::{
    JavaResolver, ProcessLauncher, ProcessParameters, ServerStatus, Supervisor,
    SupervisorConfig, SystemJavaResolver, SystemProperties,
};
use tracing::info;

use crate::cli::{LaunchArgs, StartArgs};
use crate::{AppError, CLI_TARGET};

/// Builds the supervisor-level configuration.
///
/// Flags given on the command line can only switch modes on; they never
/// override an enabled configuration value.
pub(crate) fn supervisor_config(
    config: &Config,
    launch: &LaunchArgs,
    foreground: bool,
) -> Result<SupervisorConfig, AppError> {
    let properties: SystemProperties = config.supervisor_properties()?.into_iter().collect();
    Ok(SupervisorConfig::new(config.service_version())
        .with_debug(config.debug_server() || launch.debug)
        .with_foreground(config.foreground() || foreground)
        .with_extra_system_properties(properties))
}

/// Builds per-launch parameters, making classpath entries absolute.
pub(crate) fn process_parameters(launch: &LaunchArgs) -> Result<ProcessParameters, AppError> {
    let classpath = launch
        .classpath
        .iter()
        .map(|entry| {
            path::absolute(entry).map_err(|source| AppError::Classpath {
                path: entry.clone(),
                source,
            })
        })
        .collect::<Result<Vec<PathBuf>, _>>()?;
    let properties = launch
        .system_properties
        .iter()
        .map(|entry| parse_property(entry))
        .collect::<Result<SystemProperties, _>>()?;
    Ok(ProcessParameters::new(launch.main_class.as_str())
        .with_jvm_arguments(launch.jvm_arguments.iter().cloned())
        .with_system_properties(properties)
        .with_classpath(classpath)
        .with_program_arguments(launch.program_arguments.iter().cloned()))
}

/// Java resolver honouring the configured Java home.
pub(crate) fn resolver(config: &Config) -> SystemJavaResolver {
    match config.java_home() {
        Some(home) => SystemJavaResolver::new().with_java_home(home.as_std_path()),
        None => SystemJavaResolver::new(),
    }
}

/// Prints the composed command line without spawning anything.
pub(crate) fn print_command<L, R, W>(
    supervisor: &Supervisor<L, R>,
    params: &ProcessParameters,
    stdout: &mut W,
) -> Result<(), AppError>
where
    L: ProcessLauncher,
    R: JavaResolver,
    W: Write,
{
    let command = supervisor
        .command_line(params)
        .map_err(testres_server::SupervisorError::from)?;
    writeln!(stdout, "{command}").map_err(AppError::Output)
}

/// Starts the service, optionally waits for it, and reports its status.
pub(crate) fn start<L, R, W>(
    supervisor: &mut Supervisor<L, R>,
    params: &ProcessParameters,
    args: &StartArgs,
    stdout: &mut W,
) -> Result<ServerStatus, AppError>
where
    L: ProcessLauncher,
    R: JavaResolver,
    W: Write,
{
    let mut status = supervisor.start(params)?;
    if let Some(seconds) = args.wait_secs.filter(|_| status.is_started()) {
        supervisor.wait_for(Duration::from_secs(seconds))?;
        status = supervisor.poll_status();
    }
    info!(target: CLI_TARGET, %status, "test resources service status");
    writeln!(stdout, "test resources service {status}").map_err(AppError::Output)?;
    Ok(status)
}
