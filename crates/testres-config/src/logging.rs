//! Output format of the host's diagnostic log.
//!
//! The launched server inherits the host's stderr, so supervisor events are
//! interleaved with JVM output on the same stream.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Rendering of supervisor log events on stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per line, so collectors can split supervisor events
    /// from server output.
    #[default]
    Json,
    /// Single-line events for reading alongside server output.
    Compact,
    /// Multi-field events with span context, for local troubleshooting.
    Full,
}

impl LogFormat {
    /// Whether events are emitted as machine-readable records.
    ///
    /// Structured output never carries terminal colour codes.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when text does not name a [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
