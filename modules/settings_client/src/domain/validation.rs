//! Identifier validation for schema ids and key names
//!
//! Pure checks: no I/O, the store is never consulted.

use crate::contract::{KeyName, SchemaId, SettingsError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Two or more dot-separated segments of [A-Za-z0-9_-]
#[allow(clippy::expect_used)]
static SCHEMA_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_\-]+\.)+[A-Za-z0-9_\-]+$").expect("Invalid schema id pattern")
});

#[allow(clippy::expect_used)]
static KEY_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9\-]+$").expect("Invalid key name pattern"));

/// Validate schema id format
///
/// Accepts reverse-domain style identifiers such as `org.gnome.desktop.interface`
/// or `com.example.my-app_v2`. A single segment is rejected.
pub fn validate_schema_id(input: &str) -> Result<SchemaId, SettingsError> {
    if !SCHEMA_ID_PATTERN.is_match(input) {
        return Err(SettingsError::InvalidSchemaFormat {
            input: input.to_string(),
        });
    }
    Ok(SchemaId::from_validated(input.to_string()))
}

/// Validate key name format (lowercase alphanumerics and `-`)
pub fn validate_key_name(input: &str) -> Result<KeyName, SettingsError> {
    if !KEY_NAME_PATTERN.is_match(input) {
        return Err(SettingsError::InvalidKeyFormat {
            input: input.to_string(),
        });
    }
    Ok(KeyName::from_validated(input.to_string()))
}

/// Validate a schema id given as a dynamic value; anything but a string is rejected
pub fn schema_id_from_value(input: &Value) -> Result<SchemaId, SettingsError> {
    match input {
        Value::String(s) => validate_schema_id(s),
        other => Err(SettingsError::InvalidSchemaFormat {
            input: other.to_string(),
        }),
    }
}

/// Validate a key name given as a dynamic value; anything but a string is rejected
pub fn key_name_from_value(input: &Value) -> Result<KeyName, SettingsError> {
    match input {
        Value::String(s) => validate_key_name(s),
        other => Err(SettingsError::InvalidKeyFormat {
            input: other.to_string(),
        }),
    }
}

impl TryFrom<&str> for SchemaId {
    type Error = SettingsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_schema_id(value)
    }
}

impl TryFrom<&Value> for SchemaId {
    type Error = SettingsError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        schema_id_from_value(value)
    }
}

impl std::str::FromStr for SchemaId {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_schema_id(s)
    }
}

impl TryFrom<&str> for KeyName {
    type Error = SettingsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_key_name(value)
    }
}

impl TryFrom<&Value> for KeyName {
    type Error = SettingsError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        key_name_from_value(value)
    }
}

impl std::str::FromStr for KeyName {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_key_name(s)
    }
}
