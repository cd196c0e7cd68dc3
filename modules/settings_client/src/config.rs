//! Configuration for the settings client module

use crate::infra::storage::SchemaFileEntity;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `SETTINGS_CLIENT_DIAGNOSTICS=true`
pub const ENV_PREFIX: &str = "SETTINGS_CLIENT_";

/// Settings client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Schema definition files (YAML or JSON) installed at init
    #[serde(default)]
    pub schema_files: Vec<PathBuf>,

    /// Schema definitions given inline
    #[serde(default)]
    pub schemas: Vec<SchemaFileEntity>,

    /// Log every read, write and snapshot through tracing
    #[serde(default = "default_true")]
    pub diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_files: Vec::new(),
            schemas: Vec::new(),
            diagnostics: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load from an optional YAML file, overridden by `SETTINGS_CLIENT_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load settings client configuration")
    }
}
