//! Client trait for consumers of a single schema
//!
//! Every method validates its input locally first and then makes exactly
//! the store calls it needs. Nothing is cached between calls.

use super::{
    error::SettingsError,
    model::{SchemaId, SettingValue, ValueType},
};
use crate::domain::snapshot::Snapshot;

/// Settings API bound to one installed schema
pub trait SettingsApi: Send + Sync {
    /// Schema this client is bound to
    fn schema_id(&self) -> &SchemaId;

    // ===== Single key operations =====

    /// Read a key; the variant is whatever the store declares for it
    fn get(&self, key: &str) -> Result<SettingValue, SettingsError>;

    /// Write a key. `None` is rejected with `MissingValue`.
    fn set(&self, key: &str, value: Option<SettingValue>) -> Result<(), SettingsError>;

    /// Read a key in its JSON rendering
    fn get_json(&self, key: &str) -> Result<serde_json::Value, SettingsError>;

    /// Write a key from JSON, encoded against the key's declared type
    fn set_json(&self, key: &str, value: Option<&serde_json::Value>) -> Result<(), SettingsError>;

    /// Restore the declared default of a key
    fn reset(&self, key: &str) -> Result<(), SettingsError>;

    /// Declared type of a key
    fn key_type(&self, key: &str) -> Result<ValueType, SettingsError>;

    // ===== Whole schema operations =====

    /// Keys of the schema, in store order
    fn get_key_list(&self) -> Result<Vec<String>, SettingsError>;

    /// Fresh snapshot of every key
    fn get_all(&self) -> Result<Snapshot, SettingsError>;

    /// JSON object rendering of `get_all`
    fn serialize(&self) -> Result<String, SettingsError>;
}
