//! Host boundary.
//!
//! # Responsibilities
//! - Describe what the plugin needs from its host (`PluginApi`)
//! - Model the few host-wide settings the plugin reads
//! - Provide a file-backed host for running the plugin standalone
//!
//! # Design Decisions
//! - The host is a trait object so hooks can be exercised with test doubles
//! - Event publishing is fire and forget; it cannot fail from the plugin's view
//! - Host-wide settings are nullable all the way down

pub mod file;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileHost;

/// Error reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Host-wide settings. Only the diagnostics flag is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub log_settings: LogSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    pub enable_diagnostics: Option<bool>,
}

impl ServerConfig {
    /// Diagnostics flag, false when the host left it unset.
    pub fn diagnostics_enabled(&self) -> bool {
        self.log_settings.enable_diagnostics.unwrap_or(false)
    }
}

/// Audience of a published event. The default reaches every connected client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebsocketBroadcast {
    pub user_id: Option<String>,
    pub channel_id: Option<String>,
    pub team_id: Option<String>,
}

impl WebsocketBroadcast {
    pub fn all() -> Self {
        Self::default()
    }
}

/// An event the plugin asked the host to publish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostEvent {
    pub event: String,
    pub payload: Option<serde_json::Value>,
    pub broadcast: WebsocketBroadcast,
}

/// The host API surface used by the configuration core.
///
/// Implementations must not call back into the plugin's hooks synchronously.
pub trait PluginApi: Send + Sync {
    /// Raw plugin settings as stored by the host.
    fn load_plugin_configuration(&self) -> Result<serde_json::Value, HostError>;

    /// Host-wide settings, if available.
    fn get_config(&self) -> Option<ServerConfig>;

    fn publish_websocket_event(
        &self,
        event: &str,
        payload: Option<serde_json::Value>,
        broadcast: &WebsocketBroadcast,
    );

    fn get_diagnostic_id(&self) -> String;

    fn get_server_version(&self) -> String;
}
