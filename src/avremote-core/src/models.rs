use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Volume unit advertised by a receiver plugin.
///
/// The unit decides which of the volume operations are meaningful: `None`
/// disables discrete levels entirely and leaves only relative plus/minus
/// steps, `Percent` is a 0..100 scale, and `Db` carries receiver-native
/// decibel bounds. Hosts currently treat `Db` the same as `Percent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    #[default]
    None,
    Percent,
    Db,
}

impl VolumeUnit {
    pub fn as_i32(self) -> i32 {
        match self {
            VolumeUnit::None => 0,
            VolumeUnit::Percent => 1,
            VolumeUnit::Db => 2,
        }
    }

    /// Unknown values fold to `None` so a newer peer never breaks an older one.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => VolumeUnit::Percent,
            2 => VolumeUnit::Db,
            _ => VolumeUnit::None,
        }
    }
}

/// Extras key carrying the target device unique id across the binding
/// handshake and into the plugin's settings surface.
pub const EXTRA_UNIQUE_ID: &str = "unique_id";
/// Extras key carrying the target device display name.
pub const EXTRA_NAME: &str = "name";
/// Extras key carrying the target device IP address.
pub const EXTRA_IP: &str = "ip";

/// Identity of the media-center device a plugin instance is bound to.
///
/// Passed once per binding, before any control operation, and echoed back
/// when the host launches the plugin's settings surface for that device.
/// The `unique_id` is host-assigned; an empty value indicates a broken
/// handshake and should be treated as a configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCenter {
    pub unique_id: String,
    pub name: String,
    pub ip: String,
}

impl MediaCenter {
    pub fn new(
        unique_id: impl Into<String>,
        name: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            name: name.into(),
            ip: ip.into(),
        }
    }

    /// Encode as the string map carried in the binding handshake and in
    /// settings-surface launch extras.
    pub fn to_extras(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (EXTRA_UNIQUE_ID.into(), self.unique_id.clone()),
            (EXTRA_NAME.into(), self.name.clone()),
            (EXTRA_IP.into(), self.ip.clone()),
        ])
    }

    /// Decode from the extras map; missing keys decode as empty strings so
    /// callers can detect and report a broken handshake.
    pub fn from_extras(extras: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| extras.get(key).cloned().unwrap_or_default();
        Self {
            unique_id: get(EXTRA_UNIQUE_ID),
            name: get(EXTRA_NAME),
            ip: get(EXTRA_IP),
        }
    }
}

/// Inclusive volume range advertised by a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBounds {
    pub minimum: f64,
    pub maximum: f64,
}

impl VolumeBounds {
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }

    /// The conventional bounds for [`VolumeUnit::Percent`].
    pub fn percent() -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
        }
    }

    pub fn clamp(&self, level: f64) -> f64 {
        level.max(self.minimum).min(self.maximum)
    }

    pub fn contains(&self, level: f64) -> bool {
        level >= self.minimum && level <= self.maximum
    }
}
