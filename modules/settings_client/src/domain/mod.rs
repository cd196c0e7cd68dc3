//! Domain layer - validation, value codec and the settings client service

pub mod codec;
pub mod events;
pub mod repository;
pub mod service;
pub mod snapshot;
pub mod validation;

pub use codec::CodecError;
pub use events::{DiagnosticHook, NoOpDiagnosticHook, SettingsEvent, TracingDiagnosticHook};
pub use repository::{SettingsStore, StoreError};
pub use service::Service;
pub use snapshot::Snapshot;
