//! Java executable discovery.
//!
//! The composer needs an absolute path to a runnable `java` binary. Hosts
//! with their own toolchain model implement [`JavaResolver`]; everyone else
//! uses [`SystemJavaResolver`], which consults an explicit Java home, then
//! `JAVA_HOME`, then `PATH`.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

const RESOLVER_TARGET: &str = "testres_server::resolver";

/// Environment variable naming the default Java installation.
pub const JAVA_HOME_ENV: &str = "JAVA_HOME";

/// Produces the path of a runnable Java executable.
pub trait JavaResolver {
    /// Resolves the executable, or `None` when no runtime is available.
    fn resolve(&self) -> Option<PathBuf>;
}

impl<R: JavaResolver + ?Sized> JavaResolver for &R {
    fn resolve(&self) -> Option<PathBuf> {
        (**self).resolve()
    }
}

/// Resolver always answering with a fixed executable.
impl JavaResolver for Option<PathBuf> {
    fn resolve(&self) -> Option<PathBuf> {
        self.clone()
    }
}

/// Resolves `java` from a configured home, `JAVA_HOME`, or `PATH`.
///
/// Only existing files qualify; a configured home without a `bin/java`
/// falls through to the next source.
#[derive(Debug, Clone, Default)]
pub struct SystemJavaResolver {
    java_home: Option<PathBuf>,
    java_home_env: Option<OsString>,
    search_path: Option<OsString>,
}

impl SystemJavaResolver {
    /// Creates a resolver reading `JAVA_HOME` and `PATH` from the process
    /// environment at resolution time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefers the given Java home over the environment.
    #[must_use]
    pub fn with_java_home(mut self, java_home: impl Into<PathBuf>) -> Self {
        self.java_home = Some(java_home.into());
        self
    }

    /// Uses `value` instead of the `JAVA_HOME` environment variable.
    #[must_use]
    pub fn with_java_home_env(mut self, value: impl Into<OsString>) -> Self {
        self.java_home_env = Some(value.into());
        self
    }

    /// Uses `value` instead of the `PATH` environment variable.
    #[must_use]
    pub fn with_search_path(mut self, value: impl Into<OsString>) -> Self {
        self.search_path = Some(value.into());
        self
    }

    fn from_home(home: &Path) -> Option<PathBuf> {
        let candidate = home.join("bin").join(executable_name());
        candidate.is_file().then_some(candidate)
    }

    fn from_search_path(search_path: &OsString) -> Option<PathBuf> {
        env::split_paths(search_path)
            .map(|directory| directory.join(executable_name()))
            .find(|candidate| candidate.is_file())
    }
}

impl JavaResolver for SystemJavaResolver {
    fn resolve(&self) -> Option<PathBuf> {
        if let Some(found) = self.java_home.as_deref().and_then(Self::from_home) {
            debug!(target: RESOLVER_TARGET, path = %found.display(), "using configured java home");
            return Some(found);
        }
        let java_home_env = self
            .java_home_env
            .clone()
            .or_else(|| env::var_os(JAVA_HOME_ENV));
        if let Some(found) = java_home_env
            .as_deref()
            .map(Path::new)
            .and_then(Self::from_home)
        {
            debug!(target: RESOLVER_TARGET, path = %found.display(), "using JAVA_HOME");
            return Some(found);
        }
        let search_path = self.search_path.clone().or_else(|| env::var_os("PATH"))?;
        let found = Self::from_search_path(&search_path);
        if let Some(path) = &found {
            debug!(target: RESOLVER_TARGET, path = %path.display(), "using java from PATH");
        }
        found
    }
}

const fn executable_name() -> &'static str {
    if cfg!(windows) { "java.exe" } else { "java" }
}
