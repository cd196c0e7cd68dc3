//! Domain service - settings client bound to one schema

use super::codec;
use super::events::{DiagnosticHook, NoOpDiagnosticHook, SettingsEvent};
use super::repository::SettingsStore;
use super::snapshot::Snapshot;
use super::validation::{validate_key_name, validate_schema_id};
use crate::contract::{KeyName, SchemaId, SettingValue, SettingsError, ValueType};
use std::sync::Arc;

/// Settings client for a single installed schema
///
/// Holding a `Service` proves the schema was installed when it was built.
/// It keeps no cache: every call goes to the store.
pub struct Service {
    schema_id: SchemaId,
    store: Arc<dyn SettingsStore>,
    hook: Arc<dyn DiagnosticHook>,
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("schema_id", &self.schema_id)
            .finish_non_exhaustive()
    }
}

impl Service {
    /// Bind to a schema, validating its id and confirming it is installed
    pub fn new(store: Arc<dyn SettingsStore>, schema_id: &str) -> Result<Self, SettingsError> {
        Self::with_hook(store, schema_id, Arc::new(NoOpDiagnosticHook))
    }

    /// Same as [`Service::new`] with a diagnostic hook
    pub fn with_hook(
        store: Arc<dyn SettingsStore>,
        schema_id: &str,
        hook: Arc<dyn DiagnosticHook>,
    ) -> Result<Self, SettingsError> {
        let schema_id = validate_schema_id(schema_id)?;
        Self::bind(store, schema_id, hook)
    }

    /// Bind to an already validated schema id
    pub fn bind(
        store: Arc<dyn SettingsStore>,
        schema_id: SchemaId,
        hook: Arc<dyn DiagnosticHook>,
    ) -> Result<Self, SettingsError> {
        if !store.schema_exists(schema_id.as_str())? {
            return Err(SettingsError::SchemaNotInstalled {
                schema_id: schema_id.to_string(),
            });
        }
        Ok(Self {
            schema_id,
            store,
            hook,
        })
    }

    /// Enumerating installed schemas is not supported
    pub fn list_schemas() -> Result<Vec<SchemaId>, SettingsError> {
        Err(SettingsError::Unimplemented {
            operation: "listing installed schemas".to_string(),
        })
    }

    pub fn schema_id(&self) -> &SchemaId {
        &self.schema_id
    }

    // ===== Single key operations =====

    /// Read a key
    pub fn get(&self, key: &str) -> Result<SettingValue, SettingsError> {
        let key = validate_key_name(key)?;
        self.read(&key)
    }

    /// Read a key in its JSON rendering
    pub fn get_json(&self, key: &str) -> Result<serde_json::Value, SettingsError> {
        self.get(key).map(|v| codec::decode(&v))
    }

    /// Write a key
    ///
    /// The store decides whether the variant fits the key.
    pub fn set(
        &self,
        key: &str,
        value: impl Into<Option<SettingValue>>,
    ) -> Result<(), SettingsError> {
        let key = validate_key_name(key)?;
        let Some(value) = value.into() else {
            return Err(self.rejected(&key, missing(&key)));
        };
        self.write(&key, value)
    }

    /// Write a key from JSON
    ///
    /// The value is encoded against the key's declared type before the
    /// store is asked to write it, so a mismatch costs no write call.
    pub fn set_json(
        &self,
        key: &str,
        value: Option<&serde_json::Value>,
    ) -> Result<(), SettingsError> {
        let key = validate_key_name(key)?;
        let Some(value) = value else {
            return Err(self.rejected(&key, missing(&key)));
        };
        let expected = self.store.key_type(self.schema_id.as_str(), key.as_str())?;
        let encoded = codec::encode(expected, value)
            .map_err(|e| self.rejected(&key, e.into_settings_error(key.as_str())))?;
        self.write(&key, encoded)
    }

    /// Restore the declared default of a key
    pub fn reset(&self, key: &str) -> Result<(), SettingsError> {
        let key = validate_key_name(key)?;
        self.store.reset_key(self.schema_id.as_str(), key.as_str())?;
        self.hook
            .on_event(&SettingsEvent::written(self.schema_id.as_str(), key.as_str(), None));
        Ok(())
    }

    /// Declared type of a key
    pub fn key_type(&self, key: &str) -> Result<ValueType, SettingsError> {
        let key = validate_key_name(key)?;
        Ok(self.store.key_type(self.schema_id.as_str(), key.as_str())?)
    }

    // ===== Whole schema operations =====

    /// Keys of the schema in store order
    pub fn get_key_list(&self) -> Result<Vec<String>, SettingsError> {
        Ok(self.store.list_keys(self.schema_id.as_str())?)
    }

    /// Read every key into a fresh snapshot
    pub fn get_all(&self) -> Result<Snapshot, SettingsError> {
        let keys = self.get_key_list()?;
        let snapshot = Snapshot::collect(keys, |key| self.get(key))?;
        self.hook
            .on_event(&SettingsEvent::snapshot(self.schema_id.as_str(), snapshot.len()));
        Ok(snapshot)
    }

    /// JSON object rendering of a fresh snapshot
    pub fn serialize(&self) -> Result<String, SettingsError> {
        self.get_all()?.render()
    }

    // ===== Helper Methods =====

    fn read(&self, key: &KeyName) -> Result<SettingValue, SettingsError> {
        let value = self.store.read_key(self.schema_id.as_str(), key.as_str())?;
        // Stores are external; a value without a JSON rendering is a backend fault
        codec::check(value.value_type(), &value).map_err(|e| SettingsError::Backend {
            message: format!("store returned an unusable value for '{key}': {e}"),
        })?;
        self.hook
            .on_event(&SettingsEvent::read(self.schema_id.as_str(), key.as_str(), &value));
        Ok(value)
    }

    fn write(&self, key: &KeyName, value: SettingValue) -> Result<(), SettingsError> {
        let event = SettingsEvent::written(self.schema_id.as_str(), key.as_str(), Some(&value));
        self.store
            .write_key(self.schema_id.as_str(), key.as_str(), value)
            .map_err(|e| self.rejected(key, e.into()))?;
        self.hook.on_event(&event);
        Ok(())
    }

    /// Report a refused write and hand the error back
    fn rejected(&self, key: &KeyName, error: SettingsError) -> SettingsError {
        self.hook
            .on_event(&SettingsEvent::rejected(self.schema_id.as_str(), key.as_str(), &error));
        error
    }
}

fn missing(key: &KeyName) -> SettingsError {
    SettingsError::MissingValue {
        key: key.to_string(),
    }
}
