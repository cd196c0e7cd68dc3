//! Native client implementation - wraps the domain service for in-process calls

use crate::contract::{SchemaId, SettingValue, SettingsApi, SettingsError, ValueType};
use crate::domain::{Service, Snapshot};
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Handed out by `SettingsClientModule` as `Arc<dyn SettingsApi>`.
#[derive(Clone, Debug)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl SettingsApi for NativeClient {
    fn schema_id(&self) -> &SchemaId {
        self.service.schema_id()
    }

    fn get(&self, key: &str) -> Result<SettingValue, SettingsError> {
        self.service.get(key)
    }

    fn set(&self, key: &str, value: Option<SettingValue>) -> Result<(), SettingsError> {
        self.service.set(key, value)
    }

    fn get_json(&self, key: &str) -> Result<serde_json::Value, SettingsError> {
        self.service.get_json(key)
    }

    fn set_json(&self, key: &str, value: Option<&serde_json::Value>) -> Result<(), SettingsError> {
        self.service.set_json(key, value)
    }

    fn reset(&self, key: &str) -> Result<(), SettingsError> {
        self.service.reset(key)
    }

    fn key_type(&self, key: &str) -> Result<ValueType, SettingsError> {
        self.service.key_type(key)
    }

    fn get_key_list(&self) -> Result<Vec<String>, SettingsError> {
        self.service.get_key_list()
    }

    fn get_all(&self) -> Result<Snapshot, SettingsError> {
        self.service.get_all()
    }

    fn serialize(&self) -> Result<String, SettingsError> {
        self.service.serialize()
    }
}
