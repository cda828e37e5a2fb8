//! Plugin-side plumbing for avremote receiver plugins.
//!
//! This crate provides:
//! - A JSON-based request/response protocol mirroring the
//!   [`avremote_core::ReceiverPlugin`] operations
//! - A service loop that serves any `ReceiverPlugin` over a line-delimited
//!   JSON stream (stdio when run as a process)
//! - A best-effort log relay that forwards plugin log records to the host
//!
//! # Call sequence
//!
//! The host sends [`PluginRequest`] lines and reads [`PluginResponse`]
//! lines. The first method must be `Connect`, which scopes the plugin
//! instance to one media-center device; any other method before that
//! answers with an error result. `Connect` may repeat to re-scope the
//! instance to a different device.

mod protocol;
mod relay;
mod service;

pub use protocol::{
    PluginMethod, PluginRequest, PluginResponse, PluginResult, PROTOCOL_VERSION,
};
pub use relay::{LogMessage, LogRelay, RelayLevel};
pub use service::{ReceiverService, ServiceError};
