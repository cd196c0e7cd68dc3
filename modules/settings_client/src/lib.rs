//! Settings Client Module
//!
//! Typed client for schema-described key/value settings stores. A client is
//! bound to one installed schema; it validates identifiers, enforces each
//! key's declared type, and renders whole-schema snapshots as JSON.

// Public exports
pub mod contract;
pub use contract::{
    client::SettingsApi, error::SettingsError, KeyDeclaration, KeyName, SchemaDefinition,
    SchemaId, SettingValue, ValueRange, ValueType,
};

pub mod module;
pub use module::SettingsClientModule;

pub mod domain;
pub use domain::{
    DiagnosticHook, Service as SettingsClient, SettingsEvent, SettingsStore, Snapshot, StoreError,
};

pub mod infra;
pub use infra::storage::{InMemorySettingsStore, SchemaFileEntity};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
pub use config::Config;
