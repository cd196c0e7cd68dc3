//! Contract models for the settings client
//!
//! These models are transport-agnostic and shared by the client, the store
//! capability and the schema loaders. Identifier newtypes can only be built
//! through the validators in `domain::validation`.

use std::fmt;
use std::str::FromStr;

/// Validated schema identifier (e.g. "org.gnome.desktop.interface")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(String);

impl SchemaId {
    pub(crate) fn from_validated(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemaId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated key name (lowercase alphanumerics and hyphens)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyName(String);

impl KeyName {
    pub(crate) fn from_validated(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Declared type of a settings key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int32,
    UInt32,
    Double,
    Str,
    StrArray,
    StrPairArray,
}

impl ValueType {
    /// Compact type signature, as used in schema definition files
    pub fn signature(self) -> &'static str {
        match self {
            Self::Bool => "b",
            Self::Int32 => "i",
            Self::UInt32 => "u",
            Self::Double => "d",
            Self::Str => "s",
            Self::StrArray => "as",
            Self::StrPairArray => "a(ss)",
        }
    }

    /// Human-readable description used in error messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::Bool => "a boolean value",
            Self::Int32 => "a signed 32-bit integer",
            Self::UInt32 => "an unsigned 32-bit integer",
            Self::Double => "a finite double",
            Self::Str => "a string value",
            Self::StrArray => "an array of strings",
            Self::StrPairArray => "an array of string pairs",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int32 | Self::UInt32 | Self::Double)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

/// Unrecognised type signature
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported type signature '{0}'")]
pub struct UnsupportedSignature(pub String);

impl FromStr for ValueType {
    type Err = UnsupportedSignature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "b" => Ok(Self::Bool),
            "i" => Ok(Self::Int32),
            "u" => Ok(Self::UInt32),
            "d" => Ok(Self::Double),
            "s" => Ok(Self::Str),
            "as" => Ok(Self::StrArray),
            "a(ss)" => Ok(Self::StrPairArray),
            other => Err(UnsupportedSignature(other.to_string())),
        }
    }
}

/// Typed setting value
///
/// The variant produced for a key is decided by the store's declared type,
/// never by the client.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int32(i32),
    UInt32(u32),
    Double(f64),
    Str(String),
    StrArray(Vec<String>),
    StrPairArray(Vec<(String, String)>),
}

impl SettingValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int32(_) => ValueType::Int32,
            Self::UInt32(_) => ValueType::UInt32,
            Self::Double(_) => ValueType::Double,
            Self::Str(_) => ValueType::Str,
            Self::StrArray(_) => ValueType::StrArray,
            Self::StrPairArray(_) => ValueType::StrPairArray,
        }
    }

    /// Numeric view used for range checks. All i32 and u32 values are exact in f64.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int32(v) => Some(f64::from(v)),
            Self::UInt32(v) => Some(f64::from(v)),
            Self::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value with its sequence reversed, or `None` for scalar variants
    pub fn reversed(&self) -> Option<Self> {
        match self {
            Self::StrArray(items) => Some(Self::StrArray(items.iter().rev().cloned().collect())),
            Self::StrPairArray(items) => {
                Some(Self::StrPairArray(items.iter().rev().cloned().collect()))
            }
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<u32> for SettingValue {
    fn from(v: u32) -> Self {
        Self::UInt32(v)
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(v: Vec<String>) -> Self {
        Self::StrArray(v)
    }
}

impl From<Vec<(String, String)>> for SettingValue {
    fn from(v: Vec<(String, String)>) -> Self {
        Self::StrPairArray(v)
    }
}

/// Inclusive numeric range a key's values must fall in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Declaration of a single key within a schema
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDeclaration {
    pub name: KeyName,
    pub value_type: ValueType,
    /// Value reported until the key is first written (and after a reset)
    pub default: SettingValue,
    /// Only meaningful for numeric keys
    pub range: Option<ValueRange>,
    /// Only meaningful for string keys
    pub choices: Option<Vec<String>>,
    pub summary: Option<String>,
}

impl KeyDeclaration {
    /// Unconstrained declaration whose type follows the default value
    pub fn new(name: KeyName, default: SettingValue) -> Self {
        Self {
            name,
            value_type: default.value_type(),
            default,
            range: None,
            choices: None,
            summary: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(ValueRange { min, max });
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }
}

/// Schema definition: an identifier plus its ordered key declarations
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    pub id: SchemaId,
    pub keys: Vec<KeyDeclaration>,
}

impl SchemaDefinition {
    pub fn new(id: SchemaId) -> Self {
        Self {
            id,
            keys: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: KeyDeclaration) -> Self {
        self.keys.push(key);
        self
    }

    pub fn key(&self, name: &str) -> Option<&KeyDeclaration> {
        self.keys.iter().find(|k| k.name.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_parse_matches_display() {
        for ty in [
            ValueType::Bool,
            ValueType::Int32,
            ValueType::UInt32,
            ValueType::Double,
            ValueType::Str,
            ValueType::StrArray,
            ValueType::StrPairArray,
        ] {
            assert_eq!(ty.signature().parse::<ValueType>(), Ok(ty));
        }
    }

    #[test]
    fn test_unknown_signature() {
        assert_eq!(
            "a{sv}".parse::<ValueType>(),
            Err(UnsupportedSignature("a{sv}".to_string()))
        );
        assert!("x".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_reversed_only_for_sequences() {
        let strv = SettingValue::StrArray(vec!["a".into(), "b".into()]);
        assert_eq!(
            strv.reversed(),
            Some(SettingValue::StrArray(vec!["b".into(), "a".into()]))
        );
        assert_eq!(SettingValue::Bool(true).reversed(), None);
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(SettingValue::UInt32(u32::MAX).as_f64(), Some(4294967295.0));
        assert_eq!(SettingValue::Int32(-3423).as_f64(), Some(-3423.0));
        assert_eq!(SettingValue::Str("1".into()).as_f64(), None);
    }
}
