//! Shared configuration for the test resources supervisor.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file (`--config-path` or `TESTRES_CONFIG_PATH`), then
//! `TESTRES_*` environment variables, then command-line flags.

mod defaults;
mod logging;
pub mod properties;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use self::defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_SERVICE_VERSION, default_log_filter, default_log_filter_string,
    default_log_format, default_service_version,
};
pub use self::logging::{LogFormat, LogFormatParseError};
pub use self::properties::PropertyParseError;

/// Settings for the `testres` binary and the supervisor it drives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TESTRES")]
pub struct Config {
    /// `tracing` filter expression.
    #[ortho_config(default = default_log_filter_string())]
    log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
    /// Java installation preferred over `JAVA_HOME` and `PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    java_home: Option<Utf8PathBuf>,
    /// Version announced when the service starts.
    #[ortho_config(default = default_service_version())]
    service_version: String,
    /// Expose a JDWP debug agent on the server JVM.
    ///
    /// Optional so an absent command-line flag leaves file and environment
    /// values in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    debug_server: Option<bool>,
    /// Block until the server exits instead of returning after launch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    foreground: Option<bool>,
    /// Extra `name=value` system properties applied to every launch.
    #[serde(default)]
    #[ortho_config(merge_strategy = "append")]
    system_properties: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            java_home: None,
            service_version: default_service_version(),
            debug_server: None,
            foreground: None,
            system_properties: Vec::new(),
        }
    }
}

impl Config {
    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Configured Java home, if any.
    #[must_use]
    pub fn java_home(&self) -> Option<&Utf8Path> {
        self.java_home.as_deref()
    }

    /// Service version announced at start.
    #[must_use]
    pub fn service_version(&self) -> &str {
        &self.service_version
    }

    /// Whether the debug agent is enabled.
    #[must_use]
    pub const fn debug_server(&self) -> bool {
        matches!(self.debug_server, Some(true))
    }

    /// Whether starts block until the server exits.
    #[must_use]
    pub const fn foreground(&self) -> bool {
        matches!(self.foreground, Some(true))
    }

    /// Raw `name=value` system property entries.
    #[must_use]
    pub fn system_properties(&self) -> &[String] {
        &self.system_properties
    }

    /// Prefers `home` over `JAVA_HOME` and `PATH` when resolving Java.
    #[must_use]
    pub fn with_java_home(mut self, home: impl Into<Utf8PathBuf>) -> Self {
        self.java_home = Some(home.into());
        self
    }

    /// Appends a `name=value` system property entry.
    #[must_use]
    pub fn with_system_property(mut self, entry: impl Into<String>) -> Self {
        self.system_properties.push(entry.into());
        self
    }

    /// Parses the configured system properties into ordered pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyParseError`] for the first malformed entry.
    pub fn supervisor_properties(&self) -> Result<Vec<(String, String)>, PropertyParseError> {
        properties::parse_properties(&self.system_properties)
    }
}
