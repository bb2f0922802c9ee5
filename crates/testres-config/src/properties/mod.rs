//! Parsing of `name=value` system property entries.

use thiserror::Error;

/// Problems with a configured system property entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyParseError {
    /// The entry has no `=` between name and value.
    #[error("system property `{entry}` must have the form name=value")]
    MissingSeparator {
        /// Entry as configured.
        entry: String,
    },
    /// The entry has nothing before the `=`.
    #[error("system property `{entry}` has an empty name")]
    EmptyName {
        /// Entry as configured.
        entry: String,
    },
}

/// Splits `entry` at its first `=` into a name and a value.
///
/// The value may be empty and may itself contain `=`.
///
/// # Errors
///
/// Returns [`PropertyParseError`] when the separator is missing or the name
/// is empty.
pub fn parse_property(entry: &str) -> Result<(String, String), PropertyParseError> {
    let Some((name, value)) = entry.split_once('=') else {
        return Err(PropertyParseError::MissingSeparator {
            entry: String::from(entry),
        });
    };
    if name.is_empty() {
        return Err(PropertyParseError::EmptyName {
            entry: String::from(entry),
        });
    }
    Ok((String::from(name), String::from(value)))
}

/// Parses every entry, keeping their order.
///
/// # Errors
///
/// Returns the error for the first malformed entry.
pub fn parse_properties<I, S>(entries: I) -> Result<Vec<(String, String)>, PropertyParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| parse_property(entry.as_ref()))
        .collect()
}
