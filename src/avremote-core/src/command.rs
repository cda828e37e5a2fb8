use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Version written by every custom-command encoder (binary, JSON, extras).
///
/// Decoders branch on the leading version: anything below 1 yields a default
/// record, and fields introduced in a later version default when decoding
/// older data. Versions only ever increase.
pub const PARCEL_VERSION: i32 = 1;

const KEY_VERSION: &str = "version";
const KEY_ID: &str = "id";
const KEY_COLOR: &str = "color";
const KEY_DESCRIPTION: &str = "description";
const KEY_DISPLAY_ORDER: &str = "display_order";
const KEY_ICON: &str = "icon";
const KEY_PARAM1: &str = "param1";
const KEY_PARAM2: &str = "param2";
const KEY_PARAM3: &str = "param3";
const KEY_PARAM4: &str = "param4";
const KEY_PARAM5: &str = "param5";
const KEY_READ_ONLY: &str = "read_only";
const KEY_SOURCE: &str = "source";
const KEY_TITLE: &str = "title";
const KEY_TYPE: &str = "type";
const KEY_UNIQUE_ID: &str = "unique_id";

/// A user- or plugin-defined receiver action.
///
/// The host persists these records, carries them across the process
/// boundary, and hands them back to the owning plugin for execution. The
/// `type` tag and the five parameter slots are opaque: only the owning
/// plugin interprets them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginCustomCommand {
    /// Host-assigned numeric identifier. Plugins must leave this at 0.
    pub id: i64,
    /// Accent color; not yet used by hosts.
    pub color: i32,
    pub description: String,
    /// Host-assigned ordering key. Plugins must leave this at 0.
    pub display_order: i32,
    /// Icon name; not yet used by hosts.
    pub icon: String,
    pub param1: String,
    pub param2: String,
    pub param3: String,
    pub param4: String,
    pub param5: String,
    /// When set, the host UI only allows renaming; full editing is deferred
    /// to the owning plugin's own editor surface.
    pub read_only: bool,
    /// Must always match the owning plugin's unique id. The host routes
    /// execution back to the plugin through this value.
    pub source: String,
    /// Required, non-empty.
    pub title: String,
    /// Opaque integer tag interpreted only by the owning plugin.
    #[serde(rename = "type")]
    pub kind: i32,
    /// Plugin-assigned string identifier.
    pub unique_id: String,
}

/// Advisory checks for records a plugin is about to hand to the host.
/// None of the codecs validate; malformed data always decodes to defaults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandValidationError {
    #[error("custom command title must not be empty")]
    EmptyTitle,
    #[error("custom command source must carry the owning plugin unique id")]
    EmptySource,
}

impl PluginCustomCommand {
    pub fn validate(&self) -> Result<(), CommandValidationError> {
        if self.title.is_empty() {
            return Err(CommandValidationError::EmptyTitle);
        }
        if self.source.is_empty() {
            return Err(CommandValidationError::EmptySource);
        }
        Ok(())
    }

    /// Encode to the versioned JSON object form used for persistence.
    pub fn to_json(&self) -> Value {
        let mut data = Map::new();
        data.insert(KEY_VERSION.into(), Value::from(PARCEL_VERSION));
        data.insert(KEY_ID.into(), Value::from(self.id));
        data.insert(KEY_COLOR.into(), Value::from(self.color));
        data.insert(KEY_DESCRIPTION.into(), Value::from(self.description.clone()));
        data.insert(KEY_DISPLAY_ORDER.into(), Value::from(self.display_order));
        data.insert(KEY_ICON.into(), Value::from(self.icon.clone()));
        data.insert(KEY_PARAM1.into(), Value::from(self.param1.clone()));
        data.insert(KEY_PARAM2.into(), Value::from(self.param2.clone()));
        data.insert(KEY_PARAM3.into(), Value::from(self.param3.clone()));
        data.insert(KEY_PARAM4.into(), Value::from(self.param4.clone()));
        data.insert(KEY_PARAM5.into(), Value::from(self.param5.clone()));
        data.insert(KEY_READ_ONLY.into(), Value::from(self.read_only));
        data.insert(KEY_SOURCE.into(), Value::from(self.source.clone()));
        data.insert(KEY_TITLE.into(), Value::from(self.title.clone()));
        data.insert(KEY_TYPE.into(), Value::from(self.kind));
        data.insert(KEY_UNIQUE_ID.into(), Value::from(self.unique_id.clone()));
        Value::Object(data)
    }

    /// Decode from the versioned JSON object form.
    ///
    /// Never fails: missing or mistyped fields take their type defaults, a
    /// version below 1 yields a default record, and a non-object value
    /// decodes as an empty object would.
    pub fn from_json(value: &Value) -> Self {
        let empty = Map::new();
        let data = value.as_object().unwrap_or(&empty);
        if opt_i32(data, KEY_VERSION) < 1 {
            return Self::default();
        }
        Self {
            id: opt_i64(data, KEY_ID),
            color: opt_i32(data, KEY_COLOR),
            description: opt_string(data, KEY_DESCRIPTION),
            display_order: opt_i32(data, KEY_DISPLAY_ORDER),
            icon: opt_string(data, KEY_ICON),
            param1: opt_string(data, KEY_PARAM1),
            param2: opt_string(data, KEY_PARAM2),
            param3: opt_string(data, KEY_PARAM3),
            param4: opt_string(data, KEY_PARAM4),
            param5: opt_string(data, KEY_PARAM5),
            read_only: opt_bool(data, KEY_READ_ONLY),
            source: opt_string(data, KEY_SOURCE),
            title: opt_string(data, KEY_TITLE),
            kind: opt_i32(data, KEY_TYPE),
            unique_id: opt_string(data, KEY_UNIQUE_ID),
        }
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Parse a JSON text and decode it. Only the outer parse can fail;
    /// field-level problems degrade to defaults as in [`Self::from_json`].
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(&value))
    }

    /// Encode to the string-keyed extras form carried inside UI intents.
    /// Same key set and semantics as the JSON form, all values stringified.
    pub fn to_extras(&self) -> BTreeMap<String, String> {
        let mut extras = BTreeMap::new();
        extras.insert(KEY_VERSION.into(), PARCEL_VERSION.to_string());
        extras.insert(KEY_ID.into(), self.id.to_string());
        extras.insert(KEY_COLOR.into(), self.color.to_string());
        extras.insert(KEY_DESCRIPTION.into(), self.description.clone());
        extras.insert(KEY_DISPLAY_ORDER.into(), self.display_order.to_string());
        extras.insert(KEY_ICON.into(), self.icon.clone());
        extras.insert(KEY_PARAM1.into(), self.param1.clone());
        extras.insert(KEY_PARAM2.into(), self.param2.clone());
        extras.insert(KEY_PARAM3.into(), self.param3.clone());
        extras.insert(KEY_PARAM4.into(), self.param4.clone());
        extras.insert(KEY_PARAM5.into(), self.param5.clone());
        extras.insert(
            KEY_READ_ONLY.into(),
            if self.read_only { "1" } else { "0" }.into(),
        );
        extras.insert(KEY_SOURCE.into(), self.source.clone());
        extras.insert(KEY_TITLE.into(), self.title.clone());
        extras.insert(KEY_TYPE.into(), self.kind.to_string());
        extras.insert(KEY_UNIQUE_ID.into(), self.unique_id.clone());
        extras
    }

    /// Decode from the extras form. Missing or unparsable numeric values
    /// take their type defaults; a version below 1 yields a default record.
    pub fn from_extras(extras: &BTreeMap<String, String>) -> Self {
        if extra_i32(extras, KEY_VERSION) < 1 {
            return Self::default();
        }
        Self {
            id: extra_i64(extras, KEY_ID),
            color: extra_i32(extras, KEY_COLOR),
            description: extra_string(extras, KEY_DESCRIPTION),
            display_order: extra_i32(extras, KEY_DISPLAY_ORDER),
            icon: extra_string(extras, KEY_ICON),
            param1: extra_string(extras, KEY_PARAM1),
            param2: extra_string(extras, KEY_PARAM2),
            param3: extra_string(extras, KEY_PARAM3),
            param4: extra_string(extras, KEY_PARAM4),
            param5: extra_string(extras, KEY_PARAM5),
            read_only: extra_i32(extras, KEY_READ_ONLY) == 1,
            source: extra_string(extras, KEY_SOURCE),
            title: extra_string(extras, KEY_TITLE),
            kind: extra_i32(extras, KEY_TYPE),
            unique_id: extra_string(extras, KEY_UNIQUE_ID),
        }
    }
}

// Identity is independent of the host-assigned primary key: two records
// that differ only in `id` are the same command.
impl PartialEq for PluginCustomCommand {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.description == other.description
            && self.display_order == other.display_order
            && self.icon == other.icon
            && self.param1 == other.param1
            && self.param2 == other.param2
            && self.param3 == other.param3
            && self.param4 == other.param4
            && self.param5 == other.param5
            && self.read_only == other.read_only
            && self.source == other.source
            && self.title == other.title
            && self.kind == other.kind
            && self.unique_id == other.unique_id
    }
}

impl Eq for PluginCustomCommand {}

impl Hash for PluginCustomCommand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
        self.description.hash(state);
        self.display_order.hash(state);
        self.icon.hash(state);
        self.param1.hash(state);
        self.param2.hash(state);
        self.param3.hash(state);
        self.param4.hash(state);
        self.param5.hash(state);
        self.read_only.hash(state);
        self.source.hash(state);
        self.title.hash(state);
        self.kind.hash(state);
        self.unique_id.hash(state);
    }
}

fn opt_i64(data: &Map<String, Value>, key: &str) -> i64 {
    data.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn opt_i32(data: &Map<String, Value>, key: &str) -> i32 {
    opt_i64(data, key) as i32
}

fn opt_bool(data: &Map<String, Value>, key: &str) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn opt_string(data: &Map<String, Value>, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn extra_i64(extras: &BTreeMap<String, String>, key: &str) -> i64 {
    extras
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

fn extra_i32(extras: &BTreeMap<String, String>, key: &str) -> i32 {
    extras
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

fn extra_string(extras: &BTreeMap<String, String>, key: &str) -> String {
    extras.get(key).cloned().unwrap_or_default()
}
