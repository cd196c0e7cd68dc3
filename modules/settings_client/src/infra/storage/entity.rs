//! Schema definition file entities
//!
//! Schemas are described in YAML or JSON files:
//!
//! ```yaml
//! schema_id: org.gnome.test
//! keys:
//!   - name: string-setting
//!     type: s
//!     default: abcdefg
//!   - name: int-setting
//!     type: i
//!     default: 42
//!     range: { min: -10000, max: 10000 }
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema file root
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFileEntity {
    /// Schema identifier
    pub schema_id: String,

    /// Key declarations, in the order the store reports them
    #[serde(default)]
    pub keys: Vec<KeyEntity>,
}

/// Single key declaration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyEntity {
    pub name: String,

    /// Type signature (b, i, u, d, s, as, a(ss))
    #[serde(rename = "type")]
    pub r#type: String,

    /// Default value as JSON, encoded against `type` on load
    pub default: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeEntity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Inclusive numeric range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeEntity {
    pub min: f64,
    pub max: f64,
}

impl SchemaFileEntity {
    /// Load a schema file; the format follows the extension (yaml, yml or json)
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema file {}", path.display()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse YAML schema file {}", path.display())),
            Some("json") => serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse JSON schema file {}", path.display())),
            _ => bail!(
                "unsupported schema file extension for {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        }
    }
}
