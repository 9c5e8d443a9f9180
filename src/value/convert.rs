//! Conversion between Rust types and [`Value`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use super::hint::widen_f32;
use super::{CoercionError, FloatKind, IntKind, TypeHint, Value};

/// A Rust type that can be the value of a configuration option.
///
/// `from_value` expects an already coerced value (see [`coerce`]): it only
/// accepts the exact shape that `to_value` produces.
///
/// [`coerce`]: super::coerce
pub trait ConfigValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Declared shape of this type.
    fn type_hint() -> TypeHint;

    /// Converts into a dynamic value.
    fn to_value(&self) -> Value;

    /// Converts back from a dynamic value.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] if the value has a different shape or is
    /// out of range for `Self`.
    fn from_value(value: &Value) -> Result<Self, CoercionError>;
}

/// A [`ConfigValue`] usable as a map key.
///
/// Keys are strings in every supported file format, so key types define
/// their canonical string form.
pub trait ConfigKey: ConfigValue {
    /// Renders the key.
    fn to_key(&self) -> String;

    /// Parses the key.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError::InvalidKey`] if `key` is not a valid `Self`.
    fn from_key(key: &str) -> Result<Self, CoercionError>;
}

fn invalid_key<T: ConfigValue>(key: &str) -> CoercionError {
    CoercionError::InvalidKey {
        key: key.to_owned(),
        expected: T::type_hint().to_string(),
    }
}

fn mismatch<T: ConfigValue>(value: &Value) -> CoercionError {
    CoercionError::mismatch(T::type_hint(), value.kind())
}

macro_rules! int_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl ConfigValue for $ty {
            fn type_hint() -> TypeHint {
                TypeHint::Int(IntKind::$kind)
            }

            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }

            fn from_value(value: &Value) -> Result<Self, CoercionError> {
                match value {
                    Value::Int(i) => Self::try_from(*i).map_err(|_| CoercionError::OutOfRange {
                        value: i.to_string(),
                        target: stringify!($ty),
                    }),
                    other => Err(mismatch::<Self>(other)),
                }
            }
        }

        impl ConfigKey for $ty {
            fn to_key(&self) -> String {
                self.to_string()
            }

            fn from_key(key: &str) -> Result<Self, CoercionError> {
                key.trim().parse().map_err(|_| invalid_key::<Self>(key))
            }
        }
    )*};
}

int_value!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, u8 => U8, u16 => U16, u32 => U32);

/// `u64` shares the `i64` storage bit for bit; values above `i64::MAX`
/// are written as negative numbers.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
impl ConfigValue for u64 {
    fn type_hint() -> TypeHint {
        TypeHint::Int(IntKind::U64)
    }

    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Int(i) => Ok(*i as Self),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl ConfigKey for u64 {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, CoercionError> {
        key.trim().parse().map_err(|_| invalid_key::<Self>(key))
    }
}

impl ConfigValue for f64 {
    fn type_hint() -> TypeHint {
        TypeHint::Float(FloatKind::F64)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value.as_float().ok_or_else(|| mismatch::<Self>(value))
    }
}

impl ConfigValue for f32 {
    fn type_hint() -> TypeHint {
        TypeHint::Float(FloatKind::F32)
    }

    fn to_value(&self) -> Value {
        Value::Float(widen_f32(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_float()
            .map(|x| x as Self)
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

impl ConfigValue for bool {
    fn type_hint() -> TypeHint {
        TypeHint::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value.as_bool().ok_or_else(|| mismatch::<Self>(value))
    }
}

impl ConfigKey for bool {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, CoercionError> {
        key.trim().parse().map_err(|_| invalid_key::<Self>(key))
    }
}

impl ConfigValue for String {
    fn type_hint() -> TypeHint {
        TypeHint::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

impl ConfigKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }

    fn from_key(key: &str) -> Result<Self, CoercionError> {
        Ok(key.to_owned())
    }
}

impl ConfigValue for char {
    fn type_hint() -> TypeHint {
        TypeHint::Char
    }

    fn to_value(&self) -> Value {
        Value::Char(*self)
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Char(c) => Ok(*c),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl ConfigKey for char {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, CoercionError> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(invalid_key::<Self>(key)),
        }
    }
}

/// Untyped option: whatever the file holds is kept as is.
impl ConfigValue for Value {
    fn type_hint() -> TypeHint {
        TypeHint::Any
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        Ok(value.clone())
    }
}

// ============================================================================
// Collections
// ============================================================================

fn seq_from_value<T, C>(value: &Value, hint: TypeHint) -> Result<C, CoercionError>
where
    T: ConfigValue,
    C: FromIterator<T>,
{
    let items = value
        .as_seq()
        .ok_or_else(|| CoercionError::mismatch(hint, value.kind()))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| T::from_value(item).map_err(|e| e.at_index(index)))
        .collect()
}

fn map_from_value<K, V, C>(value: &Value, hint: TypeHint) -> Result<C, CoercionError>
where
    K: ConfigKey,
    V: ConfigValue,
    C: FromIterator<(K, V)>,
{
    let map = value
        .as_map()
        .ok_or_else(|| CoercionError::mismatch(hint, value.kind()))?;
    map.iter()
        .map(|(key, item)| -> Result<(K, V), CoercionError> {
            let key_value = K::from_key(key)?;
            let item = V::from_value(item).map_err(|e| e.at_key(key))?;
            Ok((key_value, item))
        })
        .collect()
}

fn map_to_value<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: ConfigKey,
    V: ConfigValue,
{
    Value::Map(entries.map(|(k, v)| (k.to_key(), v.to_value())).collect())
}

impl<T: ConfigValue> ConfigValue for Vec<T> {
    fn type_hint() -> TypeHint {
        TypeHint::list(T::type_hint())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ConfigValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        seq_from_value::<T, _>(value, Self::type_hint())
    }
}

impl<T: ConfigValue + Eq + Hash> ConfigValue for IndexSet<T> {
    fn type_hint() -> TypeHint {
        TypeHint::set(T::type_hint())
    }

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ConfigValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        seq_from_value::<T, _>(value, Self::type_hint())
    }
}

impl<T: ConfigValue + Ord> ConfigValue for BTreeSet<T> {
    fn type_hint() -> TypeHint {
        TypeHint::set(T::type_hint())
    }

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ConfigValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        seq_from_value::<T, _>(value, Self::type_hint())
    }
}

impl<T: ConfigValue + Eq + Hash> ConfigValue for HashSet<T> {
    fn type_hint() -> TypeHint {
        TypeHint::set(T::type_hint())
    }

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ConfigValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        seq_from_value::<T, _>(value, Self::type_hint())
    }
}

impl<K: ConfigKey + Eq + Hash, V: ConfigValue> ConfigValue for IndexMap<K, V> {
    fn type_hint() -> TypeHint {
        TypeHint::map(K::type_hint(), V::type_hint())
    }

    fn to_value(&self) -> Value {
        map_to_value(self.iter())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        map_from_value::<K, V, _>(value, Self::type_hint())
    }
}

impl<K: ConfigKey + Ord, V: ConfigValue> ConfigValue for BTreeMap<K, V> {
    fn type_hint() -> TypeHint {
        TypeHint::map(K::type_hint(), V::type_hint())
    }

    fn to_value(&self) -> Value {
        map_to_value(self.iter())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        map_from_value::<K, V, _>(value, Self::type_hint())
    }
}

impl<K: ConfigKey + Eq + Hash, V: ConfigValue> ConfigValue for HashMap<K, V> {
    fn type_hint() -> TypeHint {
        TypeHint::map(K::type_hint(), V::type_hint())
    }

    fn to_value(&self) -> Value {
        map_to_value(self.iter())
    }

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        map_from_value::<K, V, _>(value, Self::type_hint())
    }
}
