use crate::models::VolumeUnit;
use crate::receiver::ReceiverPlugin;
use thiserror::Error;

/// Expectations supplied by a plugin implementation to run the shared
/// contract suite.
#[derive(Debug, Clone)]
pub struct ReceiverContractExpectations {
    /// The unique id every default custom command must carry in `source`.
    pub plugin_unique_id: String,
    /// A settings payload the plugin should accept through `restore_settings`.
    pub restore_payload: String,
    /// Version to restore at. Suites normally pick one above the plugin's
    /// current version so the monotonicity check is meaningful.
    pub restore_version: u64,
}

/// Errors surfaced by the receiver contract suite.
#[derive(Debug, Error, PartialEq)]
pub enum ReceiverContractError {
    #[error("volume bounds are inverted: minimum {minimum} > maximum {maximum}")]
    InvertedBounds { minimum: f64, maximum: f64 },
    #[error("set_mute_status({0}) failed")]
    MuteRejected(bool),
    #[error("set_mute_status({requested}) succeeded but mute_status() returned {actual}")]
    MuteNotApplied { requested: bool, actual: bool },
    #[error("toggle_mute_status failed")]
    ToggleRejected,
    #[error("toggle_mute_status left mute unchanged at {actual}")]
    ToggleNoop { actual: bool },
    #[error("set_volume_level({0}) failed")]
    SetLevelRejected(f64),
    #[error("volume_plus failed")]
    PlusRejected,
    #[error("volume_minus failed")]
    MinusRejected,
    #[error("volume level {level} escaped bounds [{minimum}, {maximum}]")]
    LevelOutOfBounds {
        level: f64,
        minimum: f64,
        maximum: f64,
    },
    #[error("default custom command has an empty title")]
    CommandTitleEmpty,
    #[error("default custom command {title:?} carries source {actual:?}, expected {expected:?}")]
    CommandSourceMismatch {
        title: String,
        actual: String,
        expected: String,
    },
    #[error("restore_settings rejected the expected payload")]
    RestoreRejected,
    #[error("settings version went backwards: {earlier} then {later}")]
    VersionDecreased { earlier: u64, later: u64 },
}

/// Run the shared receiver contract suite against a plugin implementation.
///
/// Plugin crates should call this from their own tests with fixtures that
/// match their setup. The suite mutates mute and volume state; run it
/// against a scratch instance.
pub fn run_receiver_contract<P: ReceiverPlugin>(
    plugin: &P,
    expectations: &ReceiverContractExpectations,
) -> Result<(), ReceiverContractError> {
    verify_bounds(plugin)?;
    verify_mute(plugin)?;
    verify_volume_steps(plugin)?;
    verify_commands(plugin, expectations)?;
    verify_settings(plugin, expectations)?;
    Ok(())
}

fn verify_bounds<P: ReceiverPlugin>(plugin: &P) -> Result<(), ReceiverContractError> {
    if plugin.volume_unit_type() == VolumeUnit::None {
        return Ok(());
    }
    let minimum = plugin.volume_minimal_value();
    let maximum = plugin.volume_maximal_value();
    if minimum > maximum {
        return Err(ReceiverContractError::InvertedBounds { minimum, maximum });
    }
    Ok(())
}

fn verify_mute<P: ReceiverPlugin>(plugin: &P) -> Result<(), ReceiverContractError> {
    for requested in [true, false] {
        if !plugin.set_mute_status(requested) {
            return Err(ReceiverContractError::MuteRejected(requested));
        }
        let actual = plugin.mute_status();
        if actual != requested {
            return Err(ReceiverContractError::MuteNotApplied { requested, actual });
        }
        if !plugin.toggle_mute_status() {
            return Err(ReceiverContractError::ToggleRejected);
        }
        let toggled = plugin.mute_status();
        if toggled == requested {
            return Err(ReceiverContractError::ToggleNoop { actual: toggled });
        }
    }
    Ok(())
}

fn verify_volume_steps<P: ReceiverPlugin>(plugin: &P) -> Result<(), ReceiverContractError> {
    if plugin.volume_unit_type() == VolumeUnit::None {
        return Ok(());
    }
    let minimum = plugin.volume_minimal_value();
    let maximum = plugin.volume_maximal_value();
    let check = |level: f64| {
        if level < minimum || level > maximum {
            Err(ReceiverContractError::LevelOutOfBounds {
                level,
                minimum,
                maximum,
            })
        } else {
            Ok(())
        }
    };

    // Stepping up from the ceiling must clamp, never overshoot.
    if !plugin.set_volume_level(maximum) {
        return Err(ReceiverContractError::SetLevelRejected(maximum));
    }
    for _ in 0..2 {
        if !plugin.volume_plus() {
            return Err(ReceiverContractError::PlusRejected);
        }
        check(plugin.volume_level())?;
    }

    if !plugin.set_volume_level(minimum) {
        return Err(ReceiverContractError::SetLevelRejected(minimum));
    }
    for _ in 0..2 {
        if !plugin.volume_minus() {
            return Err(ReceiverContractError::MinusRejected);
        }
        check(plugin.volume_level())?;
    }
    Ok(())
}

fn verify_commands<P: ReceiverPlugin>(
    plugin: &P,
    expectations: &ReceiverContractExpectations,
) -> Result<(), ReceiverContractError> {
    for command in plugin.default_custom_commands() {
        if command.title.is_empty() {
            return Err(ReceiverContractError::CommandTitleEmpty);
        }
        if command.source != expectations.plugin_unique_id {
            return Err(ReceiverContractError::CommandSourceMismatch {
                title: command.title,
                actual: command.source,
                expected: expectations.plugin_unique_id.clone(),
            });
        }
    }
    Ok(())
}

fn verify_settings<P: ReceiverPlugin>(
    plugin: &P,
    expectations: &ReceiverContractExpectations,
) -> Result<(), ReceiverContractError> {
    let before = plugin.settings_version();
    let _snapshot = plugin.settings();
    if !plugin.restore_settings(&expectations.restore_payload, expectations.restore_version) {
        return Err(ReceiverContractError::RestoreRejected);
    }
    // Restoring an equal-or-newer backup must never rewind the counter.
    if expectations.restore_version >= before {
        let after = plugin.settings_version();
        if after < before {
            return Err(ReceiverContractError::VersionDecreased {
                earlier: before,
                later: after,
            });
        }
    }
    Ok(())
}
