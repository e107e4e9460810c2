//! Shared test doubles for the host and telemetry boundaries.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use jitsi_plugin::host::{HostError, HostEvent, LogSettings, PluginApi, ServerConfig, WebsocketBroadcast};
use jitsi_plugin::telemetry::{TelemetryClient, TelemetryError, TrackedEvent};

/// In-memory host whose responses can be changed between notifications.
pub struct MockHost {
    payload: Mutex<Result<serde_json::Value, HostError>>,
    server_config: Mutex<Option<ServerConfig>>,
    events: Mutex<Vec<HostEvent>>,
    loads: AtomicUsize,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            payload: Mutex::new(Ok(serde_json::Value::Null)),
            server_config: Mutex::new(Some(ServerConfig::default())),
            events: Mutex::new(Vec::new()),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn with_settings(settings: serde_json::Value) -> Self {
        let host = Self::new();
        host.set_settings(settings);
        host
    }

    /// Store `settings` as the `jitsisettings` object of the plugin payload.
    pub fn set_settings(&self, settings: serde_json::Value) {
        *self.payload.lock().unwrap() = Ok(serde_json::json!({ "jitsisettings": settings }));
    }

    pub fn set_raw_payload(&self, payload: serde_json::Value) {
        *self.payload.lock().unwrap() = Ok(payload);
    }

    pub fn fail_load(&self, message: &str) {
        *self.payload.lock().unwrap() = Err(HostError::new(message));
    }

    pub fn set_diagnostics(&self, enabled: Option<bool>) {
        *self.server_config.lock().unwrap() = Some(ServerConfig {
            log_settings: LogSettings {
                enable_diagnostics: enabled,
            },
        });
    }

    pub fn clear_server_config(&self) {
        *self.server_config.lock().unwrap() = None;
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl PluginApi for MockHost {
    fn load_plugin_configuration(&self) -> Result<serde_json::Value, HostError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.payload.lock().unwrap().clone()
    }

    fn get_config(&self) -> Option<ServerConfig> {
        self.server_config.lock().unwrap().clone()
    }

    fn publish_websocket_event(
        &self,
        event: &str,
        payload: Option<serde_json::Value>,
        broadcast: &WebsocketBroadcast,
    ) {
        self.events.lock().unwrap().push(HostEvent {
            event: event.to_string(),
            payload,
            broadcast: broadcast.clone(),
        });
    }

    fn get_diagnostic_id(&self) -> String {
        "diagnostic-id".to_string()
    }

    fn get_server_version(&self) -> String {
        "9.11.0".to_string()
    }
}

/// Telemetry client that counts closes and can be told to fail them.
#[derive(Default)]
pub struct MockTelemetryClient {
    pub fail_close: bool,
    closes: AtomicUsize,
    enqueued: Mutex<Vec<TrackedEvent>>,
}

impl MockTelemetryClient {
    pub fn failing() -> Self {
        Self {
            fail_close: true,
            ..Default::default()
        }
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn enqueued(&self) -> Vec<TrackedEvent> {
        self.enqueued.lock().unwrap().clone()
    }
}

impl TelemetryClient for MockTelemetryClient {
    fn enqueue(&self, event: TrackedEvent) -> Result<(), TelemetryError> {
        self.enqueued.lock().unwrap().push(event);
        Ok(())
    }

    fn close(&self) -> Result<(), TelemetryError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(TelemetryError::Delivery("connection reset".into()));
        }
        Ok(())
    }
}
