//! Contract error types for the settings client
//!
//! These errors are transport-agnostic. Format errors are raised locally;
//! store-reported kinds are passed through unchanged.

use super::model::ValueType;

/// Settings client errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Schema identifier does not match the segmented-name pattern
    #[error("'{input}' is not a valid schema id")]
    InvalidSchemaFormat {
        /// Rejected input, rendered as text
        input: String,
    },
    /// Schema identifier is well-formed but the store does not know it
    #[error("schema '{schema_id}' is not installed")]
    SchemaNotInstalled { schema_id: String },
    /// Key name does not match the lowercase-alnum-hyphen pattern
    #[error("invalid key name format '{input}'")]
    InvalidKeyFormat { input: String },
    /// Key is well-formed but not declared by the schema
    #[error("key '{key}' does not exist in schema '{schema_id}'")]
    UnknownKey { schema_id: String, key: String },
    /// A write was attempted without a value
    #[error("no value given for key '{key}'")]
    MissingValue { key: String },
    /// A written value does not fit the key's declared type or constraints
    #[error("key '{key}' requires {}: {details}", .expected.describe())]
    TypeMismatch {
        key: String,
        expected: ValueType,
        details: String,
    },
    /// The bound schema disappeared from the store after construction
    #[error("schema '{schema_id}' is no longer available")]
    SchemaMissing { schema_id: String },
    /// Capability exists in the API but is not implemented
    #[error("{operation} has not been implemented yet")]
    Unimplemented { operation: String },
    /// Store failure outside of the taxonomy above
    #[error("settings backend error: {message}")]
    Backend { message: String },
}

impl SettingsError {
    /// Whether the error was raised before reaching the store
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidSchemaFormat { .. }
                | Self::InvalidKeyFormat { .. }
                | Self::MissingValue { .. }
                | Self::Unimplemented { .. }
        )
    }
}
