//! Declared type descriptors.

use std::fmt;

/// Width of an integer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
}

impl IntKind {
    /// Truncates a wide integer into this width, two's-complement style.
    ///
    /// No range check: `300` narrowed to `I8` is `44`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub const fn truncate(self, value: i64) -> i64 {
        match self {
            Self::I8 => value as i8 as i64,
            Self::I16 => value as i16 as i64,
            Self::I32 => value as i32 as i64,
            Self::I64 | Self::U64 => value,
            Self::U8 => value as u8 as i64,
            Self::U16 => value as u16 as i64,
            Self::U32 => value as u32 as i64,
        }
    }

    /// Rust name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }
}

/// Precision of a floating point option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl FloatKind {
    /// Rounds a value to this precision.
    ///
    /// `f32` results are re-widened through their shortest decimal form so
    /// `4.56f32` is stored (and written) as `4.56`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn round(self, value: f64) -> f64 {
        match self {
            Self::F64 => value,
            Self::F32 => widen_f32(value as f32),
        }
    }

    /// Rust name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// Widens an `f32` without exposing its binary expansion.
pub(crate) fn widen_f32(value: f32) -> f64 {
    value
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(value))
}

/// The declared shape of an option's value.
///
/// Collections carry their element types because a deserialized file only
/// tells us "a list of something".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHint {
    /// Accept whatever was read, unchanged.
    Any,
    /// Boolean.
    Bool,
    /// Integer of the given width.
    Int(IntKind),
    /// Float of the given precision.
    Float(FloatKind),
    /// String.
    String,
    /// Single character.
    Char,
    /// Ordered list of elements.
    List(Box<TypeHint>),
    /// Deduplicated set of elements.
    Set(Box<TypeHint>),
    /// Map with typed keys and values.
    Map(Box<TypeHint>, Box<TypeHint>),
}

impl TypeHint {
    /// List of `element`.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Set of `element`.
    #[must_use]
    pub fn set(element: Self) -> Self {
        Self::Set(Box::new(element))
    }

    /// Map from `key` to `value`.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("boolean"),
            Self::Int(kind) => f.write_str(kind.name()),
            Self::Float(kind) => f.write_str(kind.name()),
            Self::String => f.write_str("string"),
            Self::Char => f.write_str("character"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Set(element) => write!(f, "set<{element}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
        }
    }
}
