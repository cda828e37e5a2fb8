//! JSON-file preferences store supporting the settings-backup contract.
//!
//! Every entry is a string. The store keeps a `settings_version` counter
//! that is bumped on each effective mutation, so the host can tell whether
//! its backup of the settings blob is stale.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

const KEY_SETTINGS_VERSION: &str = "settings_version";
const RECEIVER_ADDRESS_PREFIX: &str = "host_ip_";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to read preferences at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse preferences at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write preferences at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Default)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
    settings_version: u64,
}

impl Preferences {
    /// A store with no backing file; used by tests and scratch instances.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`, or start empty when the file does not exist yet.
    pub fn load(path: PathBuf) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self {
                path: Some(path),
                ..Self::default()
            });
        }
        let contents = fs::read_to_string(&path).map_err(|source| PreferencesError::Read {
            path: path.clone(),
            source,
        })?;
        let data: Map<String, Value> =
            serde_json::from_str(&contents).map_err(|source| PreferencesError::Parse {
                path: path.clone(),
                source,
            })?;
        let mut prefs = Self {
            path: Some(path),
            ..Self::default()
        };
        prefs.absorb(&data);
        Ok(prefs)
    }

    /// Receiver address configured for one media-center device, empty when
    /// none is configured yet.
    pub fn receiver_address(&self, host_unique_id: &str) -> String {
        self.values
            .get(&address_key(host_unique_id))
            .cloned()
            .unwrap_or_default()
    }

    /// Store the receiver address for one media-center device, bumping the
    /// settings version when the value actually changes.
    pub fn set_receiver_address(
        &mut self,
        host_unique_id: &str,
        address: &str,
    ) -> Result<(), PreferencesError> {
        if self.receiver_address(host_unique_id) != address {
            self.settings_version += 1;
        }
        self.values
            .insert(address_key(host_unique_id), address.to_string());
        self.save()
    }

    pub fn settings_version(&self) -> u64 {
        self.settings_version
    }

    /// Export every entry, version included, as the opaque settings blob
    /// the host backs up.
    pub fn export_json(&self) -> String {
        let mut data = Map::new();
        for (key, value) in &self.values {
            data.insert(key.clone(), Value::String(value.clone()));
        }
        data.insert(
            KEY_SETTINGS_VERSION.into(),
            Value::String(self.settings_version.to_string()),
        );
        Value::Object(data).to_string()
    }

    /// Import a host-held settings blob, then adopt the host-supplied
    /// version. All keys except the version counter are taken over.
    ///
    /// Malformed input degrades silently: the error is logged and the call
    /// still reports success, matching the flat failure model of the rest
    /// of the contract.
    pub fn import_json(&mut self, settings: &str, version: u64) -> bool {
        match serde_json::from_str::<Map<String, Value>>(settings) {
            Ok(data) => {
                self.absorb(&data);
                self.settings_version = version;
                if let Err(err) = self.save() {
                    tracing::error!(error = %err, "failed to persist imported settings");
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to decode settings blob");
            }
        }
        true
    }

    fn absorb(&mut self, data: &Map<String, Value>) {
        for (key, value) in data {
            if key == KEY_SETTINGS_VERSION {
                self.settings_version = value
                    .as_str()
                    .and_then(|v| v.parse().ok())
                    .or_else(|| value.as_u64())
                    .unwrap_or(self.settings_version);
                continue;
            }
            let value = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            self.values.insert(key.clone(), value);
        }
    }

    fn save(&self) -> Result<(), PreferencesError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        fs::write(path, self.export_json()).map_err(|source| PreferencesError::Write {
            path: path.clone(),
            source,
        })
    }
}

fn address_key(host_unique_id: &str) -> String {
    format!("{RECEIVER_ADDRESS_PREFIX}{host_unique_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_bumps_only_on_effective_change() {
        let mut prefs = Preferences::in_memory();
        assert_eq!(prefs.settings_version(), 0);
        prefs.set_receiver_address("mc-1", "192.168.1.20").unwrap();
        assert_eq!(prefs.settings_version(), 1);
        prefs.set_receiver_address("mc-1", "192.168.1.20").unwrap();
        assert_eq!(prefs.settings_version(), 1);
        prefs.set_receiver_address("mc-1", "192.168.1.21").unwrap();
        assert_eq!(prefs.settings_version(), 2);
    }

    #[test]
    fn export_import_round_trip_adopts_host_version() {
        let mut source = Preferences::in_memory();
        source.set_receiver_address("mc-1", "192.168.1.20").unwrap();
        let blob = source.export_json();

        let mut restored = Preferences::in_memory();
        assert!(restored.import_json(&blob, 9));
        assert_eq!(restored.receiver_address("mc-1"), "192.168.1.20");
        // the exported counter is skipped; the host-supplied one wins
        assert_eq!(restored.settings_version(), 9);
    }

    #[test]
    fn malformed_blob_is_ignored_but_reported_as_success() {
        let mut prefs = Preferences::in_memory();
        prefs.set_receiver_address("mc-1", "192.168.1.20").unwrap();
        assert!(prefs.import_json("not json at all", 9));
        assert_eq!(prefs.receiver_address("mc-1"), "192.168.1.20");
        assert_eq!(prefs.settings_version(), 1);
    }

    #[test]
    fn persists_and_reloads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut prefs = Preferences::load(path.clone()).unwrap();
        prefs.set_receiver_address("mc-1", "192.168.1.20").unwrap();

        let reloaded = Preferences::load(path).unwrap();
        assert_eq!(reloaded.receiver_address("mc-1"), "192.168.1.20");
        assert_eq!(reloaded.settings_version(), 1);
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(prefs.settings_version(), 0);
        assert_eq!(prefs.receiver_address("mc-1"), "");
    }
}
