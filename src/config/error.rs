//! Error type for registry operations.

use thiserror::Error;

use crate::format::FormatError;

/// Error type for [`Config`](super::Config) operations.
///
/// Only programming mistakes and explicit [`try_save`](super::Config::try_save)
/// calls produce errors; loading reports problems through
/// [`LoadOutcome`](super::LoadOutcome) instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An option with the same key is already registered.
    #[error("Option with key '{key}' already exists")]
    DuplicateOption {
        /// The duplicated key
        key: String,
    },

    /// The option was never registered with this config.
    #[error("Option '{key}' is not registered")]
    UnregisteredOption {
        /// Key of the unknown option
        key: String,
    },

    /// The config has no file to read from or write to.
    #[error("No file specified for config")]
    NoFile,

    /// Reading, rendering or writing the file failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}
