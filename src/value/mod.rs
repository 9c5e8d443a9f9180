//! Dynamic values exchanged between option descriptors and file formats.
//!
//! This module provides:
//! - The tagged [`Value`] type every format reads into and writes from
//! - Declared type descriptors ([`TypeHint`]) for options
//! - Table-driven coercion of raw values ([`coerce`])
//! - Conversion between Rust types and values ([`ConfigValue`], [`ConfigKey`])
//!
//! # Design
//!
//! Formats only know about [`Value`]. Options know their Rust type `T` and
//! its [`TypeHint`]. Loading goes raw [`Value`] -> [`coerce`] -> normalized
//! [`Value`] -> [`ConfigValue::from_value`], so every step is an exhaustive
//! `match` instead of an unchecked cast.

mod coerce;
mod convert;
mod error;
mod hint;
mod serialize;

#[cfg(test)]
mod convert_tests;
#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
#[cfg(test)]
mod serialize_tests;

use std::fmt;

use indexmap::IndexMap;

pub use coerce::coerce;
pub use convert::{ConfigKey, ConfigValue};
pub use error::CoercionError;
pub use hint::{FloatKind, IntKind, TypeHint};

/// Ordered string-keyed mapping of dynamic values.
///
/// Used for whole files (top-level key -> value) and for nested maps.
pub type ValueMap = IndexMap<String, Value>;

/// A dynamically typed configuration value.
///
/// Sets keep insertion order and never hold two equal elements.
/// Map keys are always strings; typed keys go through [`ConfigKey`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit null (`~` in YAML, `null` in JSON).
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Any integer; narrower widths are produced by coercion.
    Int(i64),
    /// Any floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Single character.
    Char(char),
    /// Ordered sequence, duplicates allowed.
    List(Vec<Value>),
    /// Ordered sequence without duplicates.
    Set(Vec<Value>),
    /// Ordered mapping.
    Map(ValueMap),
}

impl Value {
    /// Builds a set value, dropping later duplicates.
    #[must_use]
    pub fn set_of(values: impl IntoIterator<Item = Self>) -> Self {
        let mut unique: Vec<Self> = Vec::new();
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self::Set(unique)
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Char(_) => "character",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of a list or set.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns `true` for lists, sets and maps.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(_))
    }
}

/// Human-readable rendering used for `Default: ...` descriptions.
///
/// Sequences render as `[a, b, c]`, maps as `{k: v}`. This is not the
/// on-disk syntax of any format.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Self::String(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{c}"),
            Self::List(items) | Self::Set(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Self::Map(value)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}
