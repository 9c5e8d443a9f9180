//! Error type for file formats.

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for reading, parsing, rendering and writing files.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Failed to read the file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the file.
    #[error("Failed to write config file '{}': {source}", path.display())]
    Write {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid in the format's syntax.
    #[error("Failed to parse {format}: {reason}")]
    Parse {
        /// Format name
        format: &'static str,
        /// Parser message
        reason: String,
    },

    /// A value cannot be expressed in the format.
    #[error("Failed to write '{key}' as {format}: {reason}")]
    Serialize {
        /// Format name
        format: &'static str,
        /// Top-level key being written
        key: String,
        /// Serializer message
        reason: String,
    },

    /// The document root is a scalar or a sequence.
    #[error("{format} document must be a mapping at the top level, found {found}")]
    NotAMapping {
        /// Format name
        format: &'static str,
        /// Kind of the root value
        found: &'static str,
    },

    /// A file's content could not be parsed.
    #[error("Malformed config file '{}': {source}", path.display())]
    Malformed {
        /// Path to the file
        path: PathBuf,
        /// Parse failure
        #[source]
        source: Box<FormatError>,
    },

    /// A path has no extension to pick a format by.
    #[error("Config file '{}' has no extension", path.display())]
    MissingExtension {
        /// The path
        path: PathBuf,
    },

    /// No format is registered for an extension.
    #[error("No format registered for extension '{extension}'")]
    UnknownFormat {
        /// The extension, lowercased
        extension: String,
    },
}

impl FormatError {
    /// Creates a `Parse` error from any parser error.
    pub(crate) fn parse(format: &'static str, error: impl Display) -> Self {
        Self::Parse {
            format,
            reason: error.to_string(),
        }
    }

    /// Creates a `Serialize` error from any serializer error.
    pub(crate) fn serialize(format: &'static str, key: &str, error: impl Display) -> Self {
        Self::Serialize {
            format,
            key: key.to_owned(),
            reason: error.to_string(),
        }
    }
}
