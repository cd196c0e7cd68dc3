//! Storage layer - schema file entities and the in-memory store

pub mod entity;
pub mod mapper;
pub mod memory;

pub use entity::SchemaFileEntity;
pub use memory::InMemorySettingsStore;
