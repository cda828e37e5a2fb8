use crate::command::PluginCustomCommand;
use crate::models::VolumeUnit;

/// Control surface a receiver plugin answers to once the host has bound it
/// to one device.
///
/// The host may call any operation from more than one thread, so
/// implementations own whatever locking they need and every operation must
/// be independently re-entrant. Unless noted, operations must stay fast
/// enough for a UI thread: no network or disk access.
///
/// Failure is reported as `false` (or a default value), never a structured
/// error: callers only distinguish "succeeded" from "could not complete".
pub trait ReceiverPlugin: Send + Sync {
    /// Declares which of the volume operations are meaningful.
    fn volume_unit_type(&self) -> VolumeUnit;

    /// Lower volume bound; ignored when the unit type is [`VolumeUnit::None`].
    /// Should be 0 for [`VolumeUnit::Percent`].
    fn volume_minimal_value(&self) -> f64;

    /// Upper volume bound; ignored when the unit type is [`VolumeUnit::None`].
    /// Should be 100 for [`VolumeUnit::Percent`].
    fn volume_maximal_value(&self) -> f64;

    fn set_mute_status(&self, status: bool) -> bool;

    fn mute_status(&self) -> bool;

    /// Logically `set_mute_status(!mute_status())`.
    fn toggle_mute_status(&self) -> bool;

    fn set_volume_level(&self, volume: f64) -> bool;

    fn volume_level(&self) -> f64;

    /// Step the volume up. The step size is plugin-defined and the
    /// resulting level must stay within the advertised bounds.
    fn volume_plus(&self) -> bool;

    /// Step the volume down; same rules as [`Self::volume_plus`].
    fn volume_minus(&self) -> bool;

    /// Synchronize internal state with the receiver's true current state,
    /// blocking until the two agree. The only operation expected to perform
    /// I/O; the host calls it off the UI thread.
    fn refresh(&self) -> bool;

    /// Commands the host can import into its own catalog. Every returned
    /// command must carry the plugin's own unique id in `source`; commands
    /// with many parameter combinations should be offered through the
    /// plugin's editor surface instead of returned here by the hundreds.
    fn default_custom_commands(&self) -> Vec<PluginCustomCommand>;

    fn execute_custom_command(&self, command: &PluginCustomCommand) -> bool;

    /// Called once per binding, before any other operation, to scope the
    /// instance to one device. May be called again later to re-scope the
    /// same instance to a different device; state must follow.
    fn connect_to_host(&self, unique_id: &str, name: &str, ip: &str);

    /// Monotonic settings counter. Must never decrease as a result of the
    /// plugin's own settings mutations; the host compares it against its
    /// backups to detect stale data.
    fn settings_version(&self) -> u64;

    /// Opaque settings blob the host backs up verbatim.
    fn settings(&self) -> String;

    /// Replace local settings with a host-held backup, e.g. after a
    /// reinstall. Conflict policy when `version` is not newer than the
    /// plugin's own is the plugin's choice and should be documented.
    fn restore_settings(&self, settings: &str, version: u64) -> bool;
}
