use crate::logging::LogFormat;

/// Log filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Service version reported when none is configured.
pub const DEFAULT_SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter, for serde and ortho-config defaults.
#[must_use]
pub fn default_log_filter_string() -> String {
    String::from(DEFAULT_LOG_FILTER)
}

/// Default log output format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned service version, for serde and ortho-config defaults.
#[must_use]
pub fn default_service_version() -> String {
    String::from(DEFAULT_SERVICE_VERSION)
}
