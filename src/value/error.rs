//! Error type for value coercion.

use thiserror::Error;

/// A raw value could not be converted into the declared type.
///
/// Never reaches callers of the load path: the loader logs it and falls
/// back to the option's default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The value's shape does not match the declared type.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Declared type
        expected: String,
        /// Kind of the value that was found
        found: &'static str,
    },

    /// A string that should hold exactly one character did not.
    #[error("expected a single character, found {0:?}")]
    NotSingleChar(String),

    /// A map key could not be parsed as the declared key type.
    #[error("invalid map key {key:?}: expected {expected}")]
    InvalidKey {
        /// The raw key
        key: String,
        /// Declared key type
        expected: String,
    },

    /// A value was of the right kind but outside the target's range.
    #[error("{value} is out of range for {target}")]
    OutOfRange {
        /// The offending value, rendered
        value: String,
        /// Target Rust type
        target: &'static str,
    },

    /// An element of a collection failed to coerce.
    #[error("element {index}: {source}")]
    Element {
        /// Position in the sequence
        index: usize,
        /// What went wrong with the element
        #[source]
        source: Box<Self>,
    },

    /// A map entry failed to coerce.
    #[error("entry {key:?}: {source}")]
    Entry {
        /// Key of the entry
        key: String,
        /// What went wrong with the value
        #[source]
        source: Box<Self>,
    },
}

impl CoercionError {
    /// Creates a `Mismatch` error.
    #[must_use]
    pub fn mismatch(expected: impl ToString, found: &'static str) -> Self {
        Self::Mismatch {
            expected: expected.to_string(),
            found,
        }
    }

    pub(crate) fn at_index(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn at_key(self, key: &str) -> Self {
        Self::Entry {
            key: key.to_owned(),
            source: Box::new(self),
        }
    }
}
