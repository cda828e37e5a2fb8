//! Core contract for avremote receiver plugins.
//!
//! This crate defines everything a receiver plugin and the avremote host
//! agree on: the [`ReceiverPlugin`] control surface, the
//! [`PluginCustomCommand`] record with its versioned encodings, the
//! custom-command editor handshake, and a shared conformance suite that
//! plugin crates run against their implementations.

pub mod command;
pub mod config;
pub mod editor;
pub mod logging;
pub mod models;
pub mod parcel;
pub mod paths;
pub mod receiver;
pub mod receiver_contract;

pub use command::{CommandValidationError, PluginCustomCommand, PARCEL_VERSION};
pub use config::{Config, ConfigError, LogLevel, LoggingConfig, ValidationError};
pub use editor::{EditorOutcome, EditorSession};
pub use logging::{init_logging, LoggingError, LoggingGuard};
pub use models::{MediaCenter, VolumeBounds, VolumeUnit};
pub use paths::{AppDirs, DirsError};
pub use receiver::ReceiverPlugin;

pub const APP_NAME: &str = "avremote";
pub const APP_AUTHOR: &str = "Avremote";
pub const APP_QUALIFIER: &str = "io";
