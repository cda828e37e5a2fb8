//! Sample receiver plugin with dummy state.
//!
//! Implements every operation of the receiver contract against in-memory
//! volume/mute state and a preferences-backed settings store, forwarding a
//! log record to the host for each state change. Useful as a starting
//! point for real plugins and as the reference implementation the contract
//! suite runs against.

mod preferences;

pub use preferences::{Preferences, PreferencesError};

use avremote_core::command::PluginCustomCommand;
use avremote_core::models::{MediaCenter, VolumeBounds, VolumeUnit};
use avremote_core::receiver::ReceiverPlugin;
use avremote_plugin::LogRelay;
use std::sync::{Mutex, MutexGuard};

/// Unique id this plugin registers under; every custom command it issues
/// carries it as `source`.
pub const PLUGIN_UNIQUE_ID: &str = "demo-receiver";

const TAG: &str = "DemoReceiver";
const VOLUME_STEP: f64 = 5.0;

pub struct DemoReceiver {
    state: Mutex<ReceiverState>,
    preferences: Mutex<Preferences>,
    relay: Mutex<LogRelay>,
}

struct ReceiverState {
    muted: bool,
    volume: f64,
    media_center: Option<MediaCenter>,
}

impl DemoReceiver {
    pub fn new(preferences: Preferences, relay: LogRelay) -> Self {
        Self {
            state: Mutex::new(ReceiverState {
                muted: false,
                volume: 50.0,
                media_center: None,
            }),
            preferences: Mutex::new(preferences),
            relay: Mutex::new(relay),
        }
    }

    fn bounds() -> VolumeBounds {
        VolumeBounds::percent()
    }

    fn state(&self) -> MutexGuard<'_, ReceiverState> {
        self.state.lock().expect("state lock poisoned")
    }

    fn preferences(&self) -> MutexGuard<'_, Preferences> {
        self.preferences.lock().expect("preferences lock poisoned")
    }

    fn relay(&self) -> MutexGuard<'_, LogRelay> {
        self.relay.lock().expect("relay lock poisoned")
    }
}

impl ReceiverPlugin for DemoReceiver {
    fn volume_unit_type(&self) -> VolumeUnit {
        VolumeUnit::Percent
    }

    fn volume_minimal_value(&self) -> f64 {
        Self::bounds().minimum
    }

    fn volume_maximal_value(&self) -> f64 {
        Self::bounds().maximum
    }

    fn set_mute_status(&self, status: bool) -> bool {
        self.relay()
            .verbose(TAG, format!("setting mute status: {status}"));
        self.state().muted = status;
        true
    }

    fn mute_status(&self) -> bool {
        self.state().muted
    }

    fn toggle_mute_status(&self) -> bool {
        self.relay().verbose(TAG, "toggling mute status");
        let mut state = self.state();
        state.muted = !state.muted;
        true
    }

    fn set_volume_level(&self, volume: f64) -> bool {
        self.relay()
            .verbose(TAG, format!("setting volume level: {volume}"));
        self.state().volume = Self::bounds().clamp(volume);
        true
    }

    fn volume_level(&self) -> f64 {
        self.state().volume
    }

    fn volume_plus(&self) -> bool {
        self.relay().verbose(TAG, "calling volume plus");
        let mut state = self.state();
        state.volume = Self::bounds().clamp(state.volume + VOLUME_STEP);
        true
    }

    fn volume_minus(&self) -> bool {
        self.relay().verbose(TAG, "calling volume minus");
        let mut state = self.state();
        state.volume = Self::bounds().clamp(state.volume - VOLUME_STEP);
        true
    }

    fn refresh(&self) -> bool {
        // A real plugin would query the receiver here; the dummy state is
        // always current.
        self.relay().verbose(TAG, "refreshing values from receiver");
        true
    }

    fn default_custom_commands(&self) -> Vec<PluginCustomCommand> {
        vec![
            PluginCustomCommand {
                title: "Sample command 1".into(),
                source: PLUGIN_UNIQUE_ID.into(),
                param1: "Sample command 1".into(),
                kind: 0,
                ..Default::default()
            },
            PluginCustomCommand {
                title: "Sample command 2".into(),
                source: PLUGIN_UNIQUE_ID.into(),
                param1: "Sample command 2".into(),
                kind: 1,
                read_only: true,
                ..Default::default()
            },
        ]
    }

    fn execute_custom_command(&self, command: &PluginCustomCommand) -> bool {
        self.relay()
            .verbose(TAG, format!("executing custom command: {}", command.title));
        tracing::info!(param1 = %command.param1, "custom command received");
        // The dummy receiver has nothing to execute against.
        false
    }

    fn connect_to_host(&self, unique_id: &str, name: &str, ip: &str) {
        let media_center = MediaCenter::new(unique_id, name, ip);
        let receiver_address = self.preferences().receiver_address(unique_id);
        if receiver_address.is_empty() {
            self.relay()
                .error(TAG, format!("no configuration for {name}"));
        }
        self.relay()
            .verbose(TAG, format!("connected to: {name} / {unique_id}"));
        self.state().media_center = Some(media_center);
    }

    fn settings_version(&self) -> u64 {
        self.preferences().settings_version()
    }

    fn settings(&self) -> String {
        self.preferences().export_json()
    }

    fn restore_settings(&self, settings: &str, version: u64) -> bool {
        let result = self.preferences().import_json(settings, version);
        if result {
            // Imported settings may change the device configuration;
            // re-scope to pick it up.
            let media_center = self.state().media_center.clone();
            if let Some(mc) = media_center {
                self.connect_to_host(&mc.unique_id, &mc.name, &mc.ip);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> DemoReceiver {
        DemoReceiver::new(Preferences::in_memory(), LogRelay::disconnected())
    }

    #[test]
    fn advertises_percent_with_conventional_bounds() {
        let plugin = demo();
        assert_eq!(plugin.volume_unit_type(), VolumeUnit::Percent);
        assert_eq!(plugin.volume_minimal_value(), 0.0);
        assert_eq!(plugin.volume_maximal_value(), 100.0);
    }

    #[test]
    fn volume_steps_clamp_at_the_edges() {
        let plugin = demo();
        assert!(plugin.set_volume_level(98.0));
        assert!(plugin.volume_plus());
        assert_eq!(plugin.volume_level(), 100.0);
        assert!(plugin.volume_plus());
        assert_eq!(plugin.volume_level(), 100.0);

        assert!(plugin.set_volume_level(2.0));
        assert!(plugin.volume_minus());
        assert_eq!(plugin.volume_level(), 0.0);
        assert!(plugin.volume_minus());
        assert_eq!(plugin.volume_level(), 0.0);
    }

    #[test]
    fn set_volume_level_clamps_out_of_range_requests() {
        let plugin = demo();
        assert!(plugin.set_volume_level(250.0));
        assert_eq!(plugin.volume_level(), 100.0);
        assert!(plugin.set_volume_level(-4.0));
        assert_eq!(plugin.volume_level(), 0.0);
    }

    #[test]
    fn toggle_matches_set_of_negated_state() {
        let plugin = demo();
        for initial in [false, true] {
            assert!(plugin.set_mute_status(initial));
            assert!(plugin.toggle_mute_status());
            assert_eq!(plugin.mute_status(), !initial);
        }
    }

    #[test]
    fn default_commands_are_scoped_to_the_plugin() {
        let plugin = demo();
        let commands = plugin.default_custom_commands();
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| c.source == PLUGIN_UNIQUE_ID));
        assert!(commands[1].read_only);
    }

    #[test]
    fn execute_reports_nothing_to_do() {
        let plugin = demo();
        let command = plugin.default_custom_commands().remove(0);
        assert!(!plugin.execute_custom_command(&command));
    }

    #[test]
    fn settings_round_trip_through_the_contract_surface() {
        let plugin = demo();
        plugin.connect_to_host("mc-1", "Living room", "10.0.0.2");
        plugin
            .preferences()
            .set_receiver_address("mc-1", "192.168.1.20")
            .unwrap();
        let version = plugin.settings_version();
        let blob = plugin.settings();

        let restored = demo();
        restored.connect_to_host("mc-1", "Living room", "10.0.0.2");
        assert!(restored.restore_settings(&blob, version));
        assert_eq!(restored.settings_version(), version);
        assert_eq!(
            restored.preferences().receiver_address("mc-1"),
            "192.168.1.20"
        );
    }

    #[test]
    fn rebinding_rescopes_to_the_new_device() {
        let plugin = demo();
        plugin.connect_to_host("mc-1", "Living room", "10.0.0.2");
        plugin.connect_to_host("mc-2", "Bedroom", "10.0.0.3");
        let state = plugin.state();
        let mc = state.media_center.as_ref().unwrap();
        assert_eq!(mc.unique_id, "mc-2");
        assert_eq!(mc.name, "Bedroom");
    }
}
