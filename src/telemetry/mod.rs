//! Telemetry tracking.
//!
//! # Responsibilities
//! - Describe the telemetry client the host environment provides
//! - Stamp tracked events with plugin and server identifiers
//! - Drop events when diagnostics are disabled
//!
//! # Design Decisions
//! - The tracker is rebuilt on every configuration change, the client is not
//! - Tracking never fails the caller; delivery errors are logged

pub mod log_client;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

pub use log_client::LogTelemetryClient;

/// Error from a telemetry client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelemetryError {
    #[error("telemetry client is closed")]
    Closed,

    #[error("telemetry delivery failed: {0}")]
    Delivery(String),
}

/// A single tracked event, ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub event: String,
    pub user_id: String,
    pub properties: BTreeMap<String, serde_json::Value>,
}

/// Sink for telemetry events.
pub trait TelemetryClient: Send + Sync {
    fn enqueue(&self, event: TrackedEvent) -> Result<(), TelemetryError>;

    /// Flush and release resources. Later enqueues fail with `Closed`.
    fn close(&self) -> Result<(), TelemetryError>;
}

/// Identifiers a tracker stamps onto every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerIdentity {
    pub diagnostic_id: String,
    pub server_version: String,
    pub plugin_id: String,
    pub plugin_version: String,
    /// Prefix for event names, e.g. `jitsi`.
    pub telemetry_short_name: String,
}

/// Event tracker bound to one host identity and diagnostics setting.
pub struct Tracker {
    client: Option<Arc<dyn TelemetryClient>>,
    identity: TrackerIdentity,
    enabled: bool,
}

impl Tracker {
    pub fn new(
        client: Option<Arc<dyn TelemetryClient>>,
        identity: TrackerIdentity,
        enable_diagnostics: bool,
    ) -> Self {
        Self {
            client,
            identity,
            enabled: enable_diagnostics,
        }
    }

    pub fn identity(&self) -> &TrackerIdentity {
        &self.identity
    }

    /// Whether events are actually delivered.
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.client.is_some()
    }

    /// Track `event` for `user_id`. No-op when diagnostics are disabled.
    pub fn track_event(
        &self,
        event: &str,
        user_id: &str,
        properties: BTreeMap<String, serde_json::Value>,
    ) {
        if !self.enabled {
            return;
        }
        let Some(client) = &self.client else {
            return;
        };

        let mut properties = properties;
        properties.insert("PluginID".into(), self.identity.plugin_id.clone().into());
        properties.insert(
            "PluginVersion".into(),
            self.identity.plugin_version.clone().into(),
        );
        properties.insert(
            "ServerVersion".into(),
            self.identity.server_version.clone().into(),
        );

        let tracked = TrackedEvent {
            event: format!("{}_{}", self.identity.telemetry_short_name, event),
            user_id: user_id.to_string(),
            properties,
        };

        if let Err(e) = client.enqueue(tracked) {
            tracing::debug!(error = %e, event, "Failed to track telemetry event");
        }
    }
}
