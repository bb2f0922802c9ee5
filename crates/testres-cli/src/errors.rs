//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use testres_config::PropertyParseError;
use testres_server::SupervisorError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("invalid system property: {0}")]
    Property(#[from] PropertyParseError),
    #[error("failed to resolve classpath entry {path}: {source}")]
    Classpath { path: PathBuf, source: io::Error },
    #[error("failed to install signal handlers: {0}")]
    Signals(io::Error),
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
    #[error("failed to write output: {0}")]
    Output(io::Error),
}

impl AppError {
    /// Returns true when the run ended because a signal cancelled a wait.
    pub(crate) fn is_cancelled(&self) -> bool {
        matches!(self, Self::Supervisor(error) if error.is_cancelled())
    }
}
