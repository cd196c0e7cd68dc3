//! Value codec between dynamic JSON values and typed setting values
//!
//! `encode` turns caller-supplied JSON into the variant a key declares and
//! never coerces across types. `decode` is the only place a `SettingValue`
//! is rendered, so single reads, snapshots and serialized text agree.
//!
//! For every representable value `decode` followed by `encode` with the same
//! type yields the original value. Non-finite doubles have no JSON rendering
//! and are rejected on both paths.

use crate::contract::{SettingValue, SettingsError, ValueType};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// A value that does not fit the declared type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {}: {details}", .expected.describe())]
pub struct CodecError {
    pub expected: ValueType,
    pub details: String,
}

impl CodecError {
    fn new(expected: ValueType, details: impl Into<String>) -> Self {
        Self {
            expected,
            details: details.into(),
        }
    }

    /// Attach the key the value was meant for
    pub fn into_settings_error(self, key: &str) -> SettingsError {
        SettingsError::TypeMismatch {
            key: key.to_string(),
            expected: self.expected,
            details: self.details,
        }
    }
}

/// Short description of a JSON value for error details
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(n) => format!("the number {n}"),
        Value::String(_) => "a string".to_string(),
        Value::Array(items) => format!("an array of {} element(s)", items.len()),
        Value::Object(_) => "an object".to_string(),
    }
}

/// Encode a dynamic value as the declared type
pub fn encode(expected: ValueType, input: &Value) -> Result<SettingValue, CodecError> {
    let mismatch = || CodecError::new(expected, format!("got {}", describe(input)));

    match expected {
        ValueType::Bool => input.as_bool().map(SettingValue::Bool).ok_or_else(mismatch),
        ValueType::Int32 => {
            let n = integral(input).ok_or_else(mismatch)?;
            i32::try_from(n)
                .map(SettingValue::Int32)
                .map_err(|_| CodecError::new(expected, format!("{n} is out of range")))
        }
        ValueType::UInt32 => {
            let n = integral(input).ok_or_else(mismatch)?;
            if n < 0 {
                return Err(CodecError::new(
                    expected,
                    format!("negative value {n} is not allowed"),
                ));
            }
            u32::try_from(n)
                .map(SettingValue::UInt32)
                .map_err(|_| CodecError::new(expected, format!("{n} is out of range")))
        }
        ValueType::Double => {
            let v = input.as_f64().ok_or_else(mismatch)?;
            finite(v).map(SettingValue::Double)
        }
        ValueType::Str => input
            .as_str()
            .map(|s| SettingValue::Str(s.to_string()))
            .ok_or_else(mismatch),
        ValueType::StrArray => {
            let items = input.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        CodecError::new(
                            expected,
                            format!("element {i} is {}, array items have to be strings", describe(item)),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(SettingValue::StrArray)
        }
        ValueType::StrPairArray => {
            let items = input.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| pair(i, item))
                .collect::<Result<Vec<_>, _>>()
                .map(SettingValue::StrPairArray)
        }
    }
}

/// Render a typed value as JSON
///
/// Pairs render as two-element arrays.
pub fn decode(value: &SettingValue) -> Value {
    match value {
        SettingValue::Bool(v) => Value::Bool(*v),
        SettingValue::Int32(v) => Value::from(*v),
        SettingValue::UInt32(v) => Value::from(*v),
        // Writes and reads both pass `check`, so non-finite doubles never get here
        SettingValue::Double(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
        SettingValue::Str(v) => Value::String(v.clone()),
        SettingValue::StrArray(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        SettingValue::StrPairArray(items) => Value::Array(
            items
                .iter()
                .map(|(a, b)| Value::Array(vec![Value::String(a.clone()), Value::String(b.clone())]))
                .collect(),
        ),
    }
}

/// Check that an already typed value fits the declared type
pub fn check(expected: ValueType, value: &SettingValue) -> Result<(), CodecError> {
    let actual = value.value_type();
    if actual != expected {
        return Err(CodecError::new(
            expected,
            format!("got {}", actual.describe()),
        ));
    }
    if let SettingValue::Double(v) = value {
        finite(*v)?;
    }
    Ok(())
}

fn finite(v: f64) -> Result<f64, CodecError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CodecError::new(
            ValueType::Double,
            format!("{v} has no canonical rendering"),
        ))
    }
}

/// Integer view of a JSON number; integral floats such as `3.0` are accepted
fn integral(input: &Value) -> Option<i64> {
    let Value::Number(n) = input else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        // Larger than i64::MAX, out of range for every 32-bit type
        return Some(i64::MAX);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn pair(index: usize, item: &Value) -> Result<(String, String), CodecError> {
    let bad = |details: String| CodecError::new(ValueType::StrPairArray, details);
    let tuple = item
        .as_array()
        .ok_or_else(|| bad(format!("element {index} is {}, expected a pair", describe(item))))?;
    match tuple.as_slice() {
        [Value::String(a), Value::String(b)] => Ok((a.clone(), b.clone())),
        [_, _] => Err(bad(format!("element {index} must hold two strings"))),
        other => Err(bad(format!(
            "element {index} has {} item(s), a pair has exactly 2",
            other.len()
        ))),
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        decode(self).serialize(serializer)
    }
}
