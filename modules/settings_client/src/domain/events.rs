/// Diagnostic events for the settings client
///
/// Events are handed to an optional `DiagnosticHook` after each operation.
/// They never influence the data path: a hook cannot fail an operation.
/// - Read events: one per key read, including reads done for snapshots
/// - Write events: one per accepted or rejected write
/// - Snapshot events: one per completed aggregation
use crate::contract::{SettingValue, SettingsError};
use serde::Serialize;

/// Diagnostic event types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SettingsEvent {
    /// A key was read
    ValueRead(ValueReadEvent),
    /// A key was written or reset
    ValueWritten(ValueWrittenEvent),
    /// A write was refused, locally or by the store
    WriteRejected(WriteRejectedEvent),
    /// A full snapshot was assembled
    SnapshotTaken(SnapshotTakenEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueReadEvent {
    pub schema_id: String,
    pub key: String,
    pub value: SettingValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueWrittenEvent {
    pub schema_id: String,
    pub key: String,
    /// `None` for a reset to the declared default
    pub value: Option<SettingValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteRejectedEvent {
    pub schema_id: String,
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotTakenEvent {
    pub schema_id: String,
    pub key_count: usize,
}

/// Receiver of diagnostic events
pub trait DiagnosticHook: Send + Sync {
    fn on_event(&self, event: &SettingsEvent);
}

/// Hook that drops every event
pub struct NoOpDiagnosticHook;

impl DiagnosticHook for NoOpDiagnosticHook {
    fn on_event(&self, _event: &SettingsEvent) {}
}

/// Hook that logs events through `tracing`
pub struct TracingDiagnosticHook;

impl DiagnosticHook for TracingDiagnosticHook {
    fn on_event(&self, event: &SettingsEvent) {
        match event {
            SettingsEvent::ValueRead(e) => {
                tracing::debug!(schema_id = %e.schema_id, key = %e.key, value = ?e.value, "setting read");
            }
            SettingsEvent::ValueWritten(e) => match &e.value {
                Some(value) => {
                    tracing::debug!(schema_id = %e.schema_id, key = %e.key, value = ?value, "setting written");
                }
                None => {
                    tracing::debug!(schema_id = %e.schema_id, key = %e.key, "setting reset to default");
                }
            },
            SettingsEvent::WriteRejected(e) => {
                tracing::warn!(schema_id = %e.schema_id, key = %e.key, reason = %e.reason, "setting write rejected");
            }
            SettingsEvent::SnapshotTaken(e) => {
                tracing::debug!(schema_id = %e.schema_id, key_count = e.key_count, "settings snapshot taken");
            }
        }
    }
}

impl SettingsEvent {
    pub fn read(schema_id: &str, key: &str, value: &SettingValue) -> Self {
        SettingsEvent::ValueRead(ValueReadEvent {
            schema_id: schema_id.to_string(),
            key: key.to_string(),
            value: value.clone(),
        })
    }

    pub fn written(schema_id: &str, key: &str, value: Option<&SettingValue>) -> Self {
        SettingsEvent::ValueWritten(ValueWrittenEvent {
            schema_id: schema_id.to_string(),
            key: key.to_string(),
            value: value.cloned(),
        })
    }

    pub fn rejected(schema_id: &str, key: &str, error: &SettingsError) -> Self {
        SettingsEvent::WriteRejected(WriteRejectedEvent {
            schema_id: schema_id.to_string(),
            key: key.to_string(),
            reason: error.to_string(),
        })
    }

    pub fn snapshot(schema_id: &str, key_count: usize) -> Self {
        SettingsEvent::SnapshotTaken(SnapshotTakenEvent {
            schema_id: schema_id.to_string(),
            key_count,
        })
    }
}
