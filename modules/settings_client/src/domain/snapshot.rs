//! Whole-schema snapshots and their JSON rendering

use crate::contract::{SettingValue, SettingsError};
use crate::domain::codec;
use indexmap::IndexMap;
use serde::Serialize;

/// Point-in-time read of every key of a schema, in key-list order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: IndexMap<String, SettingValue>,
}

impl Snapshot {
    /// Read every key through `read`, in the given order
    ///
    /// The first failing read aborts the aggregation; no partial snapshot
    /// is returned. A key listed twice is a backend fault.
    pub fn collect<I, F>(keys: I, mut read: F) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = String>,
        F: FnMut(&str) -> Result<SettingValue, SettingsError>,
    {
        let mut entries = IndexMap::new();
        for key in keys {
            if entries.contains_key(&key) {
                return Err(SettingsError::Backend {
                    message: format!("store listed key '{key}' more than once"),
                });
            }
            let value = read(&key)?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// JSON object with the same value rendering as single-key reads
    ///
    /// Key order is not kept; use [`Snapshot::render`] for key-list order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), codec::decode(v)))
                .collect(),
        )
    }

    /// Canonical text rendering
    pub fn render(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(|e| SettingsError::Backend {
            message: format!("failed to render snapshot: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_preserves_key_order() {
        let snapshot = Snapshot::collect(keys(&["zeta", "alpha", "mid"]), |k| {
            Ok(SettingValue::Str(k.to_uppercase()))
        })
        .unwrap();

        assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(snapshot.get("alpha"), Some(&SettingValue::Str("ALPHA".into())));
        assert_eq!(snapshot.render().unwrap(), r#"{"zeta":"ZETA","alpha":"ALPHA","mid":"MID"}"#);
    }

    #[test]
    fn test_collect_aborts_on_first_error() {
        let mut reads = Vec::new();
        let result = Snapshot::collect(keys(&["a", "b", "c"]), |k| {
            reads.push(k.to_string());
            if k == "b" {
                Err(SettingsError::UnknownKey {
                    schema_id: "org.test".to_string(),
                    key: k.to_string(),
                })
            } else {
                Ok(SettingValue::Bool(true))
            }
        });

        assert!(matches!(result, Err(SettingsError::UnknownKey { ref key, .. }) if key == "b"));
        assert_eq!(reads, vec!["a", "b"]);
    }

    #[test]
    fn test_collect_rejects_repeated_key() {
        let mut reads = 0;
        let result = Snapshot::collect(keys(&["a", "b", "a"]), |_| {
            reads += 1;
            Ok(SettingValue::Int32(1))
        });

        assert!(matches!(result, Err(SettingsError::Backend { ref message }) if message.contains("'a'")));
        assert_eq!(reads, 2);
    }

    #[test]
    fn test_render_matches_to_json() {
        let snapshot = Snapshot::collect(keys(&["d", "p"]), |k| {
            Ok(match k {
                "d" => SettingValue::Double(-12.346),
                _ => SettingValue::StrPairArray(vec![("xkb".into(), "us".into())]),
            })
        })
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&snapshot.render().unwrap()).unwrap();
        assert_eq!(parsed, snapshot.to_json());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::collect(Vec::<String>::new(), |_| unreachable!()).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.render().unwrap(), "{}");
    }
}
