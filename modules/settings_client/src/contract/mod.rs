//! Contract layer - public API for settings consumers
//!
//! This layer contains transport-agnostic models and the client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::SettingsApi;
pub use error::SettingsError;
pub use model::{
    KeyDeclaration, KeyName, SchemaDefinition, SchemaId, SettingValue, ValueRange, ValueType,
};
