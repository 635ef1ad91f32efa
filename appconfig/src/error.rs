//! Error types produced by the configuration loader.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::load::Source;
use crate::value::ValueError;

/// Reason a successful load still asks the caller to terminate: the
/// requested text has already been printed by the time this surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    /// The help table was printed.
    HelpShown,
    /// The example config document was printed.
    ExampleShown,
}

impl fmt::Display for StopCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HelpShown => "help shown",
            Self::ExampleShown => "example shown",
        })
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A source-provided string could not become the parameter's value.
    /// Resolution stops at the first such failure; earlier writes remain.
    #[error("cannot parse {origin} value `{raw}` for {path}: {reason}")]
    Parse {
        /// Dotted path of the failing parameter.
        path: String,
        /// Raw string the source supplied.
        raw: String,
        /// Which source supplied the string.
        origin: Source,
        /// Underlying conversion failure.
        #[source]
        reason: ValueError,
    },

    /// The named config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    FileRead {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The named config file is not a well-formed YAML document.
    #[error("failed to parse config file '{path}': {source}")]
    FileFormat {
        /// Path of the file that failed to parse.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The example config document could not be serialised.
    #[error("failed to render config example: {0}")]
    Render(#[source] serde_yaml::Error),

    /// Not a failure: help or example output was requested and has already
    /// been printed; the program should terminate cleanly.
    #[error("a stop is expected: {0}")]
    Stop(StopCause),
}

impl ConfigError {
    /// `true` when this is the clean-exit signal rather than a failure.
    #[must_use]
    pub fn is_stop_request(&self) -> bool {
        matches!(self, Self::Stop(_))
    }

    /// The stop sub-classification, when this is a stop signal.
    #[must_use]
    pub fn stop_cause(&self) -> Option<StopCause> {
        match self {
            Self::Stop(cause) => Some(*cause),
            _ => None,
        }
    }
}
