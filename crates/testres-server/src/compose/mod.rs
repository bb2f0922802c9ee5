//! Argument composition for the service JVM.
//!
//! [`compose`] is a pure function: identical inputs always yield the same
//! ordered tokens. Downstream tooling relies on the positions, so the order
//! below is part of the contract:
//!
//! 1. the Java executable;
//! 2. the JVM arguments;
//! 3. the debug agent, when enabled;
//! 4. the per-call system properties as `-D<name>=<value>`;
//! 5. the supervisor-level system properties, in the same form;
//! 6. [`CLASSPATH_FLAG`] and the joined classpath;
//! 7. the main class;
//! 8. the program arguments.
//!
//! Supervisor-level properties are never deduplicated against per-call ones.
//! The JVM keeps the last definition of a repeated `-D` flag, so emission
//! order alone decides which value wins.

use std::fmt;
use std::path::Path;

use crate::error::ComposeError;
use crate::parameters::{ProcessParameters, SupervisorConfig, SystemProperties};

/// Port the debug agent listens on.
pub const DEBUG_PORT: u16 = 8000;

/// JDWP agent token inserted when debugging is enabled.
pub const DEBUG_AGENT_ARGUMENT: &str =
    "-agentlib:jdwp=transport=dt_socket,server=y,suspend=n,address=*:8000";

/// Flag preceding the joined classpath.
pub const CLASSPATH_FLAG: &str = "-cp";

/// Platform separator used to join classpath entries.
#[cfg(windows)]
pub const PATH_SEPARATOR: &str = ";";

/// Platform separator used to join classpath entries.
#[cfg(not(windows))]
pub const PATH_SEPARATOR: &str = ":";

/// Ordered command-line tokens; token 0 is the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        self.tokens.first().map_or("", String::as_str)
    }

    /// Arguments following the program.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// Every token, program included.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Consumes the command line, returning its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.tokens.join(" "))
    }
}

/// Builds the command line launching the service.
///
/// # Errors
///
/// Returns [`ComposeError::MissingExecutable`] when `executable` is `None`
/// and [`ComposeError::MissingMainClass`] when the parameters lack a main
/// class. Both are checked before any token is produced.
/// [`ComposeError::NonUtf8Path`] reports an executable or classpath entry
/// that is not valid UTF-8.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// use testres_server::{ProcessParameters, SupervisorConfig, compose};
///
/// let params = ProcessParameters::new("com.example.MyApp")
///     .with_system_property("foo", "bar")
///     .with_classpath_entry("/a/x.jar");
/// let config = SupervisorConfig::new("1.0").with_extra_system_property("foo", "baz");
/// let command = compose(Some(Path::new("/usr/bin/java")), &params, &config)?;
/// assert_eq!(
///     command.arguments(),
///     ["-Dfoo=bar", "-Dfoo=baz", "-cp", "/a/x.jar", "com.example.MyApp"]
/// );
/// # Ok::<(), testres_server::ComposeError>(())
/// ```
pub fn compose(
    executable: Option<&Path>,
    params: &ProcessParameters,
    config: &SupervisorConfig,
) -> Result<CommandLine, ComposeError> {
    let program = executable.ok_or(ComposeError::MissingExecutable)?;
    let main_class = params.main_class().ok_or(ComposeError::MissingMainClass)?;

    let classpath = join_classpath(params.classpath())?;

    let mut tokens = Vec::with_capacity(token_capacity(params, config));
    tokens.push(path_token(program)?.to_owned());
    tokens.extend(params.jvm_arguments().iter().cloned());
    if config.debug_enabled() {
        tokens.push(String::from(DEBUG_AGENT_ARGUMENT));
    }
    push_properties(&mut tokens, params.system_properties());
    push_properties(&mut tokens, config.extra_system_properties());
    tokens.push(String::from(CLASSPATH_FLAG));
    tokens.push(classpath);
    tokens.push(main_class.to_owned());
    tokens.extend(params.program_arguments().iter().cloned());

    Ok(CommandLine { tokens })
}

fn push_properties(tokens: &mut Vec<String>, properties: &SystemProperties) {
    tokens.extend(
        properties
            .iter()
            .map(|(name, value)| format!("-D{name}={value}")),
    );
}

fn path_token(path: &Path) -> Result<&str, ComposeError> {
    path.to_str().ok_or_else(|| ComposeError::NonUtf8Path {
        path: path.to_path_buf(),
    })
}

fn join_classpath<P: AsRef<Path>>(entries: &[P]) -> Result<String, ComposeError> {
    let parts = entries
        .iter()
        .map(|entry| path_token(entry.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(PATH_SEPARATOR))
}

fn token_capacity(params: &ProcessParameters, config: &SupervisorConfig) -> usize {
    // executable, classpath flag, classpath, main class, debug agent
    5 + params.jvm_arguments().len()
        + params.system_properties().len()
        + config.extra_system_properties().len()
        + params.program_arguments().len()
}
