//! Coercion of raw deserialized values into declared types.
//!
//! Rules, first match wins:
//! 1. `null` passes through (the loader treats it as "unset").
//! 2. Values already of the declared kind are kept.
//! 3. Any number converts to any numeric kind by truncation/widening.
//! 4. A one-character string becomes a character.
//! 5. Lists and sets become the declared list/set, element by element.
//! 6. Maps become the declared map, key by key and value by value.
//! 7. Anything else is a [`CoercionError`].

use super::{CoercionError, TypeHint, Value, ValueMap};

/// Converts `value` into the shape described by `hint`.
///
/// Narrowing never checks ranges: `300` coerced to `u8` is `44`, `1.9`
/// coerced to an integer is `1`.
///
/// # Errors
///
/// Returns [`CoercionError`] when the value cannot take the declared shape.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn coerce(value: Value, hint: &TypeHint) -> Result<Value, CoercionError> {
    match (hint, value) {
        (_, Value::Null) => Ok(Value::Null),
        (TypeHint::Any, value)
        | (TypeHint::Bool, value @ Value::Bool(_))
        | (TypeHint::String, value @ Value::String(_))
        | (TypeHint::Char, value @ Value::Char(_)) => Ok(value),
        (TypeHint::Int(kind), Value::Int(i)) => Ok(Value::Int(kind.truncate(i))),
        (TypeHint::Int(kind), Value::Float(x)) => Ok(Value::Int(kind.truncate(x as i64))),
        (TypeHint::Float(kind), Value::Int(i)) => Ok(Value::Float(kind.round(i as f64))),
        (TypeHint::Float(kind), Value::Float(x)) => Ok(Value::Float(kind.round(x))),
        (TypeHint::Char, Value::String(s)) => single_char(s).map(Value::Char),
        (TypeHint::List(element), Value::List(items) | Value::Set(items)) => {
            coerce_items(items, element).map(Value::List)
        }
        (TypeHint::Set(element), Value::List(items) | Value::Set(items)) => {
            coerce_items(items, element).map(Value::set_of)
        }
        (TypeHint::Map(key, value), Value::Map(map)) => coerce_map(map, key, value).map(Value::Map),
        (hint, value) => Err(CoercionError::mismatch(hint, value.kind())),
    }
}

fn single_char(s: String) -> Result<char, CoercionError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CoercionError::NotSingleChar(s)),
    }
}

fn coerce_items(items: Vec<Value>, element: &TypeHint) -> Result<Vec<Value>, CoercionError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| coerce(item, element).map_err(|e| e.at_index(index)))
        .collect()
}

fn coerce_map(
    map: ValueMap,
    key_hint: &TypeHint,
    value_hint: &TypeHint,
) -> Result<ValueMap, CoercionError> {
    let mut coerced = ValueMap::with_capacity(map.len());
    for (key, value) in map {
        let key = coerce_key(key, key_hint)?;
        let value = coerce(value, value_hint).map_err(|e| e.at_key(&key))?;
        coerced.insert(key, value);
    }
    Ok(coerced)
}

/// Normalizes a map key to the canonical string form of the declared key type.
fn coerce_key(key: String, hint: &TypeHint) -> Result<String, CoercionError> {
    let normalized = match hint {
        TypeHint::Any | TypeHint::String => return Ok(key),
        TypeHint::Char if key.chars().count() == 1 => return Ok(key),
        TypeHint::Bool => key.trim().parse::<bool>().ok().map(|b| b.to_string()),
        TypeHint::Int(kind) => key
            .trim()
            .parse::<i64>()
            .ok()
            .map(|i| kind.truncate(i).to_string()),
        TypeHint::Float(kind) => key
            .trim()
            .parse::<f64>()
            .ok()
            .map(|x| Value::Float(kind.round(x)).to_string()),
        _ => None,
    };
    normalized.ok_or_else(|| CoercionError::InvalidKey {
        key,
        expected: hint.to_string(),
    })
}
