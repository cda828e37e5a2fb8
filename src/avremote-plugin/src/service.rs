//! Service loop that exposes a [`ReceiverPlugin`] over a line-delimited
//! JSON stream.

use crate::protocol::{PluginMethod, PluginRequest, PluginResponse, PluginResult};
use avremote_core::receiver::ReceiverPlugin;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Errors that terminate the service loop. Anything recoverable (malformed
/// request line, operation before `Connect`) is answered on the wire
/// instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read request: {0}")]
    Read(std::io::Error),
    #[error("failed to write response: {0}")]
    Write(std::io::Error),
    #[error("failed to encode response: {0}")]
    Encode(serde_json::Error),
}

/// Serves one receiver plugin instance to one host connection.
pub struct ReceiverService<R> {
    plugin: R,
    connected: bool,
}

impl<R: ReceiverPlugin> ReceiverService<R> {
    pub fn new(plugin: R) -> Self {
        Self {
            plugin,
            connected: false,
        }
    }

    /// Run until `Shutdown` or EOF. Responses are written and flushed one
    /// per request, in request order.
    pub fn serve<I: BufRead, O: Write>(
        &mut self,
        input: I,
        output: &mut O,
    ) -> Result<(), ServiceError> {
        for line in input.lines() {
            let line = line.map_err(ServiceError::Read)?;
            if line.trim().is_empty() {
                continue;
            }
            let request: PluginRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding malformed request line");
                    let response = PluginResponse {
                        id: 0,
                        result: PluginResult::Error {
                            message: format!("malformed request: {err}"),
                        },
                    };
                    write_response(output, &response)?;
                    continue;
                }
            };
            let shutdown = matches!(request.method, PluginMethod::Shutdown);
            let response = PluginResponse {
                id: request.id,
                result: self.dispatch(request.method),
            };
            write_response(output, &response)?;
            if shutdown {
                tracing::info!("shutdown requested, ending service loop");
                break;
            }
        }
        Ok(())
    }

    /// Access the plugin behind the service, e.g. for teardown.
    pub fn plugin(&self) -> &R {
        &self.plugin
    }

    fn dispatch(&mut self, method: PluginMethod) -> PluginResult {
        if !self.connected
            && !matches!(
                method,
                PluginMethod::Connect { .. } | PluginMethod::Shutdown
            )
        {
            return PluginResult::Error {
                message: "not connected: Connect must precede other methods".into(),
            };
        }

        match method {
            PluginMethod::Connect {
                unique_id,
                name,
                ip,
            } => {
                self.plugin.connect_to_host(&unique_id, &name, &ip);
                self.connected = true;
                PluginResult::Connected
            }
            PluginMethod::GetVolumeUnitType => PluginResult::UnitType {
                unit: self.plugin.volume_unit_type(),
            },
            PluginMethod::GetVolumeMinimalValue => PluginResult::Level {
                value: self.plugin.volume_minimal_value(),
            },
            PluginMethod::GetVolumeMaximalValue => PluginResult::Level {
                value: self.plugin.volume_maximal_value(),
            },
            PluginMethod::SetMuteStatus { status } => PluginResult::Bool {
                value: self.plugin.set_mute_status(status),
            },
            PluginMethod::GetMuteStatus => PluginResult::Bool {
                value: self.plugin.mute_status(),
            },
            PluginMethod::ToggleMuteStatus => PluginResult::Bool {
                value: self.plugin.toggle_mute_status(),
            },
            PluginMethod::SetVolumeLevel { volume } => PluginResult::Bool {
                value: self.plugin.set_volume_level(volume),
            },
            PluginMethod::GetVolumeLevel => PluginResult::Level {
                value: self.plugin.volume_level(),
            },
            PluginMethod::VolumePlus => PluginResult::Bool {
                value: self.plugin.volume_plus(),
            },
            PluginMethod::VolumeMinus => PluginResult::Bool {
                value: self.plugin.volume_minus(),
            },
            PluginMethod::Refresh => PluginResult::Bool {
                value: self.plugin.refresh(),
            },
            PluginMethod::GetDefaultCustomCommands => PluginResult::Commands {
                commands: self.plugin.default_custom_commands(),
            },
            PluginMethod::ExecuteCustomCommand { command } => PluginResult::Bool {
                value: self.plugin.execute_custom_command(&command),
            },
            PluginMethod::GetSettingsVersion => PluginResult::SettingsVersion {
                version: self.plugin.settings_version(),
            },
            PluginMethod::GetSettings => PluginResult::Settings {
                settings: self.plugin.settings(),
            },
            PluginMethod::RestoreSettings { settings, version } => PluginResult::Bool {
                value: self.plugin.restore_settings(&settings, version),
            },
            PluginMethod::Shutdown => PluginResult::ShutdownAck,
        }
    }
}

fn write_response<O: Write>(output: &mut O, response: &PluginResponse) -> Result<(), ServiceError> {
    let json = serde_json::to_string(response).map_err(ServiceError::Encode)?;
    writeln!(output, "{json}").map_err(ServiceError::Write)?;
    output.flush().map_err(ServiceError::Write)
}
