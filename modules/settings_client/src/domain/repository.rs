//! Store capability consumed by the settings client
//!
//! The store owns persistence and is the final authority on whether a value
//! fits a key. Implementations live in infra/storage.

use crate::contract::{SettingValue, SettingsError, ValueType};

/// Errors reported by a settings store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("schema '{schema_id}' is not available")]
    SchemaMissing { schema_id: String },

    #[error("key '{key}' does not exist in schema '{schema_id}'")]
    UnknownKey { schema_id: String, key: String },

    #[error("invalid value for key '{key}': {details}")]
    TypeMismatch {
        key: String,
        expected: ValueType,
        details: String,
    },

    #[error("invalid schema definition '{schema_id}': {details}")]
    InvalidDefinition { schema_id: String, details: String },

    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for SettingsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SchemaMissing { schema_id } => SettingsError::SchemaMissing { schema_id },
            StoreError::UnknownKey { schema_id, key } => {
                SettingsError::UnknownKey { schema_id, key }
            }
            StoreError::TypeMismatch {
                key,
                expected,
                details,
            } => SettingsError::TypeMismatch {
                key,
                expected,
                details,
            },
            other @ (StoreError::InvalidDefinition { .. } | StoreError::Unavailable(_)) => {
                SettingsError::Backend {
                    message: other.to_string(),
                }
            }
        }
    }
}

/// Narrow interface to the settings backend
///
/// Identifiers are passed as plain strings; the client validates them first.
pub trait SettingsStore: Send + Sync {
    /// Whether a schema with this id is installed
    fn schema_exists(&self, schema_id: &str) -> Result<bool, StoreError>;

    /// Read the current value of a key
    fn read_key(&self, schema_id: &str, key: &str) -> Result<SettingValue, StoreError>;

    /// Type-check and write a key; a rejected write leaves the stored value untouched
    fn write_key(&self, schema_id: &str, key: &str, value: SettingValue) -> Result<(), StoreError>;

    /// Keys declared by the schema. Order is not guaranteed stable across calls.
    fn list_keys(&self, schema_id: &str) -> Result<Vec<String>, StoreError>;

    /// Declared type of a key
    fn key_type(&self, schema_id: &str, key: &str) -> Result<ValueType, StoreError>;

    /// Restore the declared default of a key
    fn reset_key(&self, schema_id: &str, key: &str) -> Result<(), StoreError>;
}
