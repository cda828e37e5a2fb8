//! Protocol types for the host <-> receiver-plugin call surface.
//!
//! Every call is synchronous: the host writes one request line and blocks
//! on the matching response line. There is no structured failure beyond the
//! `Error` result; transport loss is fatal to the individual call and the
//! host treats it as "plugin unavailable".

use avremote_core::command::PluginCustomCommand;
use avremote_core::models::VolumeUnit;
use serde::{Deserialize, Serialize};

/// Protocol version for compatibility checking.
pub const PROTOCOL_VERSION: u32 = 1;

/// Request sent from the host to a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRequest {
    /// Unique request ID for correlation.
    pub id: u64,
    /// The method to invoke on the plugin.
    pub method: PluginMethod,
}

/// Response from a plugin to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Request ID this response correlates to.
    pub id: u64,
    /// The result of the method invocation.
    pub result: PluginResult,
}

/// Methods that can be invoked on a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum PluginMethod {
    /// Scope the plugin instance to one media-center device. Must come
    /// before any other method; may repeat to re-scope.
    Connect {
        unique_id: String,
        name: String,
        ip: String,
    },
    GetVolumeUnitType,
    GetVolumeMinimalValue,
    GetVolumeMaximalValue,
    SetMuteStatus { status: bool },
    GetMuteStatus,
    ToggleMuteStatus,
    SetVolumeLevel { volume: f64 },
    GetVolumeLevel,
    VolumePlus,
    VolumeMinus,
    /// The one method allowed to take long enough for network I/O.
    Refresh,
    GetDefaultCustomCommands,
    ExecuteCustomCommand { command: PluginCustomCommand },
    GetSettingsVersion,
    GetSettings,
    RestoreSettings { settings: String, version: u64 },
    /// End the session gracefully.
    Shutdown,
}

/// Result of a plugin method invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum PluginResult {
    /// Connect acknowledged.
    Connected,
    UnitType { unit: VolumeUnit },
    Level { value: f64 },
    /// Success flag for the set/toggle/step/execute family.
    Bool { value: bool },
    Commands { commands: Vec<PluginCustomCommand> },
    SettingsVersion { version: u64 },
    Settings { settings: String },
    /// Shutdown acknowledged.
    ShutdownAck,
    /// Error response; the only failure shape that crosses the boundary.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_tagged_method() {
        let req = PluginRequest {
            id: 1,
            method: PluginMethod::SetVolumeLevel { volume: 42.5 },
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"SetVolumeLevel\""));
        assert!(json.contains("42.5"));
    }

    #[test]
    fn connect_round_trips() {
        let json = r#"{"id":7,"method":{"type":"Connect","params":{"unique_id":"mc-1","name":"Living room","ip":"10.0.0.2"}}}"#;
        let req: PluginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, 7);
        match req.method {
            PluginMethod::Connect { unique_id, name, ip } => {
                assert_eq!(unique_id, "mc-1");
                assert_eq!(name, "Living room");
                assert_eq!(ip, "10.0.0.2");
            }
            _ => panic!("expected Connect"),
        }
    }

    #[test]
    fn result_round_trips_unit_type() {
        let resp = PluginResponse {
            id: 3,
            result: PluginResult::UnitType {
                unit: VolumeUnit::Percent,
            },
        };
        let json = serde_json::to_string(&resp).unwrap();
        let decoded: PluginResponse = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            decoded.result,
            PluginResult::UnitType {
                unit: VolumeUnit::Percent
            }
        ));
    }

    #[test]
    fn command_crosses_the_protocol_intact() {
        let command = PluginCustomCommand {
            title: "Input HDMI 1".into(),
            source: "demo-receiver".into(),
            param1: "hdmi1".into(),
            kind: 2,
            ..Default::default()
        };
        let req = PluginRequest {
            id: 9,
            method: PluginMethod::ExecuteCustomCommand {
                command: command.clone(),
            },
        };
        let json = serde_json::to_string(&req).unwrap();
        let decoded: PluginRequest = serde_json::from_str(&json).unwrap();
        match decoded.method {
            PluginMethod::ExecuteCustomCommand { command: decoded } => {
                assert_eq!(decoded, command)
            }
            _ => panic!("expected ExecuteCustomCommand"),
        }
    }
}
