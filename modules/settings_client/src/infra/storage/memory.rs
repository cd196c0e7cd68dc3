//! In-memory settings store
//!
//! Reference implementation of the store capability. Values live only in
//! process memory; a key that was never written reads as its default.

use crate::contract::{KeyDeclaration, SchemaDefinition, SettingValue, ValueType};
use crate::domain::codec::{self, CodecError};
use crate::domain::repository::{SettingsStore, StoreError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Installed schema with the values written so far
struct SchemaState {
    definition: SchemaDefinition,
    values: HashMap<String, SettingValue>,
}

/// Settings store kept in process memory
#[derive(Default)]
pub struct InMemorySettingsStore {
    schemas: RwLock<HashMap<String, SchemaState>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store with the given schemas installed
    pub fn with_schemas<I>(schemas: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = SchemaDefinition>,
    {
        let store = Self::new();
        for schema in schemas {
            store.register_schema(schema)?;
        }
        Ok(store)
    }

    /// Install a schema, replacing any schema with the same id and its values
    pub fn register_schema(&self, definition: SchemaDefinition) -> Result<(), StoreError> {
        let schema_id = definition.id.to_string();
        let invalid = |details: String| StoreError::InvalidDefinition {
            schema_id: schema_id.clone(),
            details,
        };

        let mut names = std::collections::HashSet::new();
        for key in &definition.keys {
            if !names.insert(key.name.as_str()) {
                return Err(invalid(format!("key '{}' is declared twice", key.name)));
            }
            codec::check(key.value_type, &key.default)
                .and_then(|_| admit(key, &key.default))
                .map_err(|e| invalid(format!("default of '{}' is invalid: {}", key.name, e)))?;
        }

        tracing::info!(schema_id = %schema_id, keys = definition.keys.len(), "Registered settings schema");
        self.schemas.write().insert(
            schema_id,
            SchemaState {
                definition,
                values: HashMap::new(),
            },
        );
        Ok(())
    }

    /// Uninstall a schema; returns whether it was installed
    pub fn remove_schema(&self, schema_id: &str) -> bool {
        let removed = self.schemas.write().remove(schema_id).is_some();
        if removed {
            tracing::info!(schema_id = %schema_id, "Removed settings schema");
        }
        removed
    }
}

fn schema_missing(schema_id: &str) -> StoreError {
    StoreError::SchemaMissing {
        schema_id: schema_id.to_string(),
    }
}

fn unknown_key(schema_id: &str, key: &str) -> StoreError {
    StoreError::UnknownKey {
        schema_id: schema_id.to_string(),
        key: key.to_string(),
    }
}

/// Check a well-typed value against a key's range and choices
pub(crate) fn admit(declaration: &KeyDeclaration, value: &SettingValue) -> Result<(), CodecError> {
    if let (Some(range), Some(v)) = (declaration.range, value.as_f64()) {
        if !range.contains(v) {
            return Err(CodecError {
                expected: declaration.value_type,
                details: format!("{v} is outside the range [{}, {}]", range.min, range.max),
            });
        }
    }
    if let (Some(choices), SettingValue::Str(s)) = (&declaration.choices, value) {
        if !choices.iter().any(|c| c == s) {
            return Err(CodecError {
                expected: declaration.value_type,
                details: format!("'{s}' is not one of {}", choices.join(", ")),
            });
        }
    }
    Ok(())
}

impl SettingsStore for InMemorySettingsStore {
    fn schema_exists(&self, schema_id: &str) -> Result<bool, StoreError> {
        Ok(self.schemas.read().contains_key(schema_id))
    }

    fn read_key(&self, schema_id: &str, key: &str) -> Result<SettingValue, StoreError> {
        let schemas = self.schemas.read();
        let state = schemas.get(schema_id).ok_or_else(|| schema_missing(schema_id))?;
        let declaration = state
            .definition
            .key(key)
            .ok_or_else(|| unknown_key(schema_id, key))?;
        Ok(state
            .values
            .get(key)
            .unwrap_or(&declaration.default)
            .clone())
    }

    fn write_key(&self, schema_id: &str, key: &str, value: SettingValue) -> Result<(), StoreError> {
        let mut schemas = self.schemas.write();
        let state = schemas
            .get_mut(schema_id)
            .ok_or_else(|| schema_missing(schema_id))?;
        let declaration = state
            .definition
            .key(key)
            .ok_or_else(|| unknown_key(schema_id, key))?;

        codec::check(declaration.value_type, &value)
            .and_then(|_| admit(declaration, &value))
            .map_err(|e| StoreError::TypeMismatch {
                key: key.to_string(),
                expected: e.expected,
                details: e.details,
            })?;

        state.values.insert(key.to_string(), value);
        Ok(())
    }

    fn list_keys(&self, schema_id: &str) -> Result<Vec<String>, StoreError> {
        let schemas = self.schemas.read();
        let state = schemas.get(schema_id).ok_or_else(|| schema_missing(schema_id))?;
        Ok(state
            .definition
            .keys
            .iter()
            .map(|k| k.name.to_string())
            .collect())
    }

    fn key_type(&self, schema_id: &str, key: &str) -> Result<ValueType, StoreError> {
        let schemas = self.schemas.read();
        let state = schemas.get(schema_id).ok_or_else(|| schema_missing(schema_id))?;
        state
            .definition
            .key(key)
            .map(|k| k.value_type)
            .ok_or_else(|| unknown_key(schema_id, key))
    }

    fn reset_key(&self, schema_id: &str, key: &str) -> Result<(), StoreError> {
        let mut schemas = self.schemas.write();
        let state = schemas
            .get_mut(schema_id)
            .ok_or_else(|| schema_missing(schema_id))?;
        if state.definition.key(key).is_none() {
            return Err(unknown_key(schema_id, key));
        }
        state.values.remove(key);
        Ok(())
    }
}
