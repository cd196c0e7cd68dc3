//! Module declaration: configuration, store and client wiring

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::{SchemaDefinition, SettingsApi, SettingsError};
use crate::domain::{DiagnosticHook, NoOpDiagnosticHook, Service, TracingDiagnosticHook};
use crate::infra::storage::{InMemorySettingsStore, SchemaFileEntity};
use anyhow::{bail, Context, Result};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Settings client module
///
/// Owns the store and hands out clients bound to single schemas.
pub struct SettingsClientModule {
    config: RwLock<Config>,
    store: Arc<InMemorySettingsStore>,
    hook: RwLock<Arc<dyn DiagnosticHook>>,
}

impl Default for SettingsClientModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            store: Arc::new(InMemorySettingsStore::new()),
            hook: RwLock::new(Arc::new(NoOpDiagnosticHook)),
        }
    }
}

impl SettingsClientModule {
    /// Build and initialise a module from configuration
    pub fn from_config(cfg: Config) -> Result<Self> {
        let module = Self::default();
        module.init(cfg)?;
        Ok(module)
    }

    /// Install every configured schema and pick the diagnostic hook
    pub fn init(&self, cfg: Config) -> Result<()> {
        let mut entities = Vec::with_capacity(cfg.schema_files.len() + cfg.schemas.len());
        for path in &cfg.schema_files {
            entities.push(SchemaFileEntity::from_path(path)?);
        }
        entities.extend(cfg.schemas.iter().cloned());

        // Parse everything before installing anything
        let definitions = entities
            .into_iter()
            .map(|entity| {
                let schema_id = entity.schema_id.clone();
                SchemaDefinition::try_from(entity)
                    .with_context(|| format!("invalid schema definition '{}'", schema_id))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::with_capacity(definitions.len());
        for definition in &definitions {
            if !seen.insert(definition.id.as_str()) {
                bail!("schema '{}' is defined more than once", definition.id);
            }
        }

        for definition in definitions {
            self.store.register_schema(definition)?;
        }

        let hook: Arc<dyn DiagnosticHook> = if cfg.diagnostics {
            Arc::new(TracingDiagnosticHook)
        } else {
            Arc::new(NoOpDiagnosticHook)
        };
        *self.hook.write() = hook;
        *self.config.write() = cfg;

        tracing::info!("Settings client module initialized");
        Ok(())
    }

    /// Client bound to an installed schema
    pub fn client(&self, schema_id: &str) -> Result<Arc<dyn SettingsApi>, SettingsError> {
        let hook = self.hook.read().clone();
        let service = Service::with_hook(self.store.clone(), schema_id, hook)?;
        Ok(Arc::new(NativeClient::new(Arc::new(service))))
    }

    /// Store backing every client of this module
    pub fn store(&self) -> Arc<InMemorySettingsStore> {
        self.store.clone()
    }

    /// Configuration the module was initialised with
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }
}
