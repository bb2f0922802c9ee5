//! Inputs consumed by the argument composer.
//!
//! [`ProcessParameters`] describe a single launch and are supplied by the
//! host on every start. [`SupervisorConfig`] is fixed for the lifetime of a
//! supervisor.

use std::path::PathBuf;

/// Ordered system properties with linked-map semantics.
///
/// Iteration follows insertion order. Inserting a name that is already
/// present replaces its value in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemProperties {
    entries: Vec<(String, String)>,
}

impl SystemProperties {
    /// Creates an empty property set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces a property, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = name.into();
        let replacement = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            return Some(std::mem::replace(&mut entry.1, replacement));
        }
        self.entries.push((key, replacement));
        None
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of properties.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no property is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SystemProperties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        properties.extend(iter);
        properties
    }
}

impl<K, V> Extend<(K, V)> for SystemProperties
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Parameters describing one launch of the service.
///
/// # Example
///
/// ```
/// use testres_server::ProcessParameters;
///
/// let params = ProcessParameters::new("com.example.MyApp")
///     .with_jvm_argument("-Xmx256m")
///     .with_system_property("foo", "bar")
///     .with_classpath_entry("/a/x.jar")
///     .with_program_argument("--port=0");
/// assert_eq!(params.main_class(), Some("com.example.MyApp"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessParameters {
    jvm_arguments: Vec<String>,
    system_properties: SystemProperties,
    classpath: Vec<PathBuf>,
    main_class: Option<String>,
    program_arguments: Vec<String>,
}

impl ProcessParameters {
    /// Creates parameters launching `main_class` with everything else empty.
    #[must_use]
    pub fn new(main_class: impl Into<String>) -> Self {
        Self {
            main_class: Some(main_class.into()),
            ..Self::default()
        }
    }

    /// Creates parameters without a main class.
    ///
    /// Composing such parameters fails with
    /// [`ComposeError::MissingMainClass`](crate::ComposeError::MissingMainClass).
    #[must_use]
    pub fn without_main_class() -> Self {
        Self::default()
    }

    /// Appends a JVM argument.
    #[must_use]
    pub fn with_jvm_argument(mut self, argument: impl Into<String>) -> Self {
        self.jvm_arguments.push(argument.into());
        self
    }

    /// Appends several JVM arguments in order.
    #[must_use]
    pub fn with_jvm_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.jvm_arguments
            .extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Sets a per-call system property.
    #[must_use]
    pub fn with_system_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.system_properties.insert(name, value);
        self
    }

    /// Replaces the per-call system properties.
    #[must_use]
    pub fn with_system_properties(mut self, properties: SystemProperties) -> Self {
        self.system_properties = properties;
        self
    }

    /// Appends a classpath entry.
    #[must_use]
    pub fn with_classpath_entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.classpath.push(entry.into());
        self
    }

    /// Appends several classpath entries in order.
    #[must_use]
    pub fn with_classpath<I, P>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.classpath.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Appends a program argument.
    #[must_use]
    pub fn with_program_argument(mut self, argument: impl Into<String>) -> Self {
        self.program_arguments.push(argument.into());
        self
    }

    /// Appends several program arguments in order.
    #[must_use]
    pub fn with_program_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.program_arguments
            .extend(arguments.into_iter().map(Into::into));
        self
    }

    /// JVM arguments, in order.
    #[must_use]
    pub fn jvm_arguments(&self) -> &[String] {
        &self.jvm_arguments
    }

    /// Per-call system properties.
    #[must_use]
    pub const fn system_properties(&self) -> &SystemProperties {
        &self.system_properties
    }

    /// Classpath entries, in order.
    #[must_use]
    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    /// Main class, when set and non-empty.
    #[must_use]
    pub fn main_class(&self) -> Option<&str> {
        self.main_class.as_deref().filter(|class| !class.is_empty())
    }

    /// Program arguments, in order.
    #[must_use]
    pub fn program_arguments(&self) -> &[String] {
        &self.program_arguments
    }
}

/// Settings fixed for the lifetime of a supervisor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupervisorConfig {
    service_version: String,
    debug_enabled: bool,
    foreground: bool,
    extra_system_properties: SystemProperties,
}

impl SupervisorConfig {
    /// Creates a background, non-debug configuration for the given service
    /// version.
    #[must_use]
    pub fn new(service_version: impl Into<String>) -> Self {
        Self {
            service_version: service_version.into(),
            ..Self::default()
        }
    }

    /// Enables or disables the debug agent.
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    /// Makes `start` block until the server exits.
    #[must_use]
    pub const fn with_foreground(mut self, foreground: bool) -> Self {
        self.foreground = foreground;
        self
    }

    /// Adds a supervisor-level system property.
    #[must_use]
    pub fn with_extra_system_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.extra_system_properties.insert(name, value);
        self
    }

    /// Replaces the supervisor-level system properties.
    #[must_use]
    pub fn with_extra_system_properties(mut self, properties: SystemProperties) -> Self {
        self.extra_system_properties = properties;
        self
    }

    /// Version of the service, reported when starting.
    #[must_use]
    pub fn service_version(&self) -> &str {
        &self.service_version
    }

    /// Whether the debug agent is attached.
    #[must_use]
    pub const fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    /// Whether `start` blocks until exit.
    #[must_use]
    pub const fn foreground(&self) -> bool {
        self.foreground
    }

    /// Supervisor-level system properties.
    #[must_use]
    pub const fn extra_system_properties(&self) -> &SystemProperties {
        &self.extra_system_properties
    }
}
