//! Common test utilities: fixture schema and mock stores
#![allow(dead_code)]

use parking_lot::RwLock;
use serde_json::{json, Value};
use settings_client::{
    InMemorySettingsStore, SchemaDefinition, SchemaFileEntity, SettingValue, SettingsStore,
    StoreError, ValueType,
};
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_SCHEMA: &str = "org.example.settings-client.test";

/// One key of the fixture schema with the values the tests write to it
#[derive(Debug, Clone)]
pub struct KeyFixture {
    pub key: &'static str,
    pub original: Value,
    pub test_values: Vec<Value>,
}

/// Keys of the fixture schema, one per supported type
pub fn key_fixtures() -> Vec<KeyFixture> {
    vec![
        KeyFixture {
            key: "string-setting",
            original: json!("abcdefg"),
            test_values: vec![json!("test test"), json!(""), json!("Grüße, 世界 ✓ 🎉")],
        },
        KeyFixture {
            key: "bool-setting",
            original: json!(true),
            test_values: vec![json!(false), json!(true)],
        },
        KeyFixture {
            key: "int-setting",
            original: json!(42),
            test_values: vec![json!(-3423), json!(0), json!(9999)],
        },
        KeyFixture {
            key: "uint-setting",
            original: json!(7),
            test_values: vec![json!(0), json!(4294967295u32), json!(123)],
        },
        KeyFixture {
            key: "double-setting",
            original: json!(3.5),
            test_values: vec![json!(-12.346), json!(2.0000000001), json!(0.1)],
        },
        KeyFixture {
            key: "strv-setting",
            original: json!(["one", "two", "three"]),
            test_values: vec![json!([]), json!(["three", "one", "two"]), json!(["ä", "ö"])],
        },
        KeyFixture {
            key: "pairs-setting",
            original: json!([["xkb", "us"], ["xkb", "de"]]),
            test_values: vec![json!([]), json!([["xkb", "de"], ["ibus", "mozc-jp"]])],
        },
    ]
}

/// Fixture schema as a file entity
pub fn schema_entity() -> SchemaFileEntity {
    serde_json::from_value(json!({
        "schema_id": TEST_SCHEMA,
        "keys": [
            { "name": "string-setting", "type": "s", "default": "abcdefg" },
            { "name": "bool-setting", "type": "b", "default": true },
            { "name": "int-setting", "type": "i", "default": 42,
              "range": { "min": -10000, "max": 10000 } },
            { "name": "uint-setting", "type": "u", "default": 7 },
            { "name": "double-setting", "type": "d", "default": 3.5 },
            { "name": "strv-setting", "type": "as", "default": ["one", "two", "three"] },
            { "name": "pairs-setting", "type": "a(ss)", "default": [["xkb", "us"], ["xkb", "de"]] }
        ]
    }))
    .unwrap()
}

pub fn schema_definition() -> SchemaDefinition {
    SchemaDefinition::try_from(schema_entity()).unwrap()
}

/// Fresh store with the fixture schema installed
pub fn fixture_store() -> Arc<InMemorySettingsStore> {
    Arc::new(InMemorySettingsStore::with_schemas([schema_definition()]).unwrap())
}

/// Install a tracing subscriber once so diagnostic output shows up with --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("settings_client=debug")
        .with_test_writer()
        .try_init();
}

// Mock store implementations for testing
pub mod mocks {
    use super::*;

    /// Wraps a store, counts calls per operation and can inject failures
    pub struct CountingStore {
        inner: Arc<dyn SettingsStore>,
        calls: RwLock<HashMap<&'static str, usize>>,
        fail_reads: RwLock<HashMap<String, StoreError>>,
        reverse_key_list: bool,
    }

    impl CountingStore {
        pub fn new(inner: Arc<dyn SettingsStore>) -> Self {
            Self {
                inner,
                calls: RwLock::new(HashMap::new()),
                fail_reads: RwLock::new(HashMap::new()),
                reverse_key_list: false,
            }
        }

        /// Report keys in the reverse of the inner store's order
        pub fn reversed(mut self) -> Self {
            self.reverse_key_list = true;
            self
        }

        /// Make reads of `key` fail with `error`
        pub fn fail_read(&self, key: &str, error: StoreError) {
            self.fail_reads.write().insert(key.to_string(), error);
        }

        pub fn calls(&self, operation: &str) -> usize {
            self.calls.read().get(operation).copied().unwrap_or(0)
        }

        pub fn total_calls(&self) -> usize {
            self.calls.read().values().sum()
        }

        fn record(&self, operation: &'static str) {
            *self.calls.write().entry(operation).or_insert(0) += 1;
        }
    }

    impl SettingsStore for CountingStore {
        fn schema_exists(&self, schema_id: &str) -> Result<bool, StoreError> {
            self.record("schema_exists");
            self.inner.schema_exists(schema_id)
        }

        fn read_key(&self, schema_id: &str, key: &str) -> Result<SettingValue, StoreError> {
            self.record("read_key");
            if let Some(err) = self.fail_reads.read().get(key) {
                return Err(err.clone());
            }
            self.inner.read_key(schema_id, key)
        }

        fn write_key(
            &self,
            schema_id: &str,
            key: &str,
            value: SettingValue,
        ) -> Result<(), StoreError> {
            self.record("write_key");
            self.inner.write_key(schema_id, key, value)
        }

        fn list_keys(&self, schema_id: &str) -> Result<Vec<String>, StoreError> {
            self.record("list_keys");
            let mut keys = self.inner.list_keys(schema_id)?;
            if self.reverse_key_list {
                keys.reverse();
            }
            Ok(keys)
        }

        fn key_type(&self, schema_id: &str, key: &str) -> Result<ValueType, StoreError> {
            self.record("key_type");
            self.inner.key_type(schema_id, key)
        }

        fn reset_key(&self, schema_id: &str, key: &str) -> Result<(), StoreError> {
            self.record("reset_key");
            self.inner.reset_key(schema_id, key)
        }
    }
}

/// Compare two key lists as sets
pub fn assert_same_items(actual: &[String], expected: &[&str]) {
    assert_eq!(actual.len(), expected.len(), "key counts differ: {actual:?} vs {expected:?}");
    for key in expected {
        assert!(actual.iter().any(|k| k == key), "Missing key '{key}'");
    }
}
