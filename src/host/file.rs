//! File-backed host.
//!
//! Serves plugin settings and host identifiers from a TOML file:
//!
//! ```toml
//! [server]
//! diagnostic_id = "d3b5..."
//! version = "9.11.0"
//! enable_diagnostics = false
//!
//! [plugin.jitsisettings]
//! jitsiurl = "https://meet.example.org"
//! jitsiembedded = true
//! ```
//!
//! The file is re-read on every load so edits take effect on the next change
//! notification.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::sync::broadcast;

use crate::config::loader::ConfigError;
use crate::host::{HostError, HostEvent, LogSettings, PluginApi, ServerConfig, WebsocketBroadcast};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Server version reported when the file does not name one.
pub const DEFAULT_SERVER_VERSION: &str = "0.0.0";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostFile {
    server: ServerSection,
    plugin: Option<toml::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerSection {
    diagnostic_id: Option<String>,
    version: Option<String>,
    enable_diagnostics: Option<bool>,
}

/// Host that reads everything from a single TOML file.
pub struct FileHost {
    path: PathBuf,
    diagnostic_id: String,
    events: broadcast::Sender<HostEvent>,
}

impl FileHost {
    /// Create a host for `path`, reading the file once for its diagnostic ID.
    ///
    /// A missing diagnostic ID is replaced by a random one that is kept for
    /// the lifetime of the host.
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let file = read_host_file(path)?;
        let diagnostic_id = file
            .server
            .diagnostic_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            path: path.to_path_buf(),
            diagnostic_id,
            events,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Subscribe to events the plugin publishes.
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.events.subscribe()
    }
}

fn read_host_file(path: &Path) -> Result<HostFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

impl PluginApi for FileHost {
    fn load_plugin_configuration(&self) -> Result<serde_json::Value, HostError> {
        let file = read_host_file(&self.path).map_err(|e| HostError::new(e.to_string()))?;
        match file.plugin {
            Some(plugin) => {
                serde_json::to_value(plugin).map_err(|e| HostError::new(e.to_string()))
            }
            None => Ok(serde_json::Value::Null),
        }
    }

    fn get_config(&self) -> Option<ServerConfig> {
        match read_host_file(&self.path) {
            Ok(file) => Some(ServerConfig {
                log_settings: LogSettings {
                    enable_diagnostics: file.server.enable_diagnostics,
                },
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Host settings unavailable");
                None
            }
        }
    }

    fn publish_websocket_event(
        &self,
        event: &str,
        payload: Option<serde_json::Value>,
        broadcast: &WebsocketBroadcast,
    ) {
        tracing::debug!(event, "Publishing event");
        // No subscribers is fine
        let _ = self.events.send(HostEvent {
            event: event.to_string(),
            payload,
            broadcast: broadcast.clone(),
        });
    }

    fn get_diagnostic_id(&self) -> String {
        self.diagnostic_id.clone()
    }

    fn get_server_version(&self) -> String {
        read_host_file(&self.path)
            .ok()
            .and_then(|file| file.server.version)
            .unwrap_or_else(|| DEFAULT_SERVER_VERSION.to_string())
    }
}
