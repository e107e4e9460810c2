//! Plugin context.
//!
//! # Data Flow
//! ```text
//! host thread ──▶ on_configuration_change ──▶ load ─▶ validate ─▶ tracker ─▶ set_configuration
//!                                                                              │
//!                                                     ConfigStore::replace ◀───┘
//!                                                              │
//!                                                              ▼
//!                                                  publish config_update (outside lock)
//!
//! host threads ──▶ request paths ──▶ get_configuration() ──▶ SettingsSnapshot
//! ```
//!
//! # Design Decisions
//! - One `Plugin` per activation, shared by reference with every hook
//! - Hooks may run concurrently on any host thread
//! - Validation policy is explicit; lenient matches what hosts expect today

mod hooks;

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use thiserror::Error;

use crate::config::{
    ClientConfig, ConfigError, ConfigStore, Configuration, Replaced, SettingsSnapshot,
    ValidationError,
};
use crate::host::{PluginApi, WebsocketBroadcast};
use crate::telemetry::{TelemetryClient, Tracker};

/// Event published to all clients after the configuration changed.
pub const CONFIG_CHANGE_EVENT: &str = "config_update";

/// Short name prefixed to telemetry event names.
pub const TELEMETRY_SHORT_NAME: &str = "jitsi";

/// Static plugin metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
}

pub const MANIFEST: Manifest = Manifest {
    id: "jitsi",
    version: env!("CARGO_PKG_VERSION"),
};

/// What to do with settings that fail validation during a change notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Log the violation and publish the settings anyway.
    #[default]
    Lenient,
    /// Return the violation to the host and keep the previous settings.
    Strict,
}

/// Error returned from a plugin hook.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("failed to load plugin configuration: {0}")]
    LoadConfiguration(#[source] ConfigError),

    #[error("invalid plugin configuration: {0}")]
    InvalidConfiguration(#[source] ValidationError),
}

/// The plugin's top-level context.
pub struct Plugin {
    api: Arc<dyn PluginApi>,
    store: ConfigStore,
    telemetry_client: Option<Arc<dyn TelemetryClient>>,
    tracker: ArcSwapOption<Tracker>,
    validation_policy: ValidationPolicy,
}

impl Plugin {
    pub fn new(api: Arc<dyn PluginApi>) -> Self {
        Self {
            api,
            store: ConfigStore::new(),
            telemetry_client: None,
            tracker: ArcSwapOption::empty(),
            validation_policy: ValidationPolicy::default(),
        }
    }

    pub fn with_telemetry_client(mut self, client: Arc<dyn TelemetryClient>) -> Self {
        self.telemetry_client = Some(client);
        self
    }

    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.validation_policy = policy;
        self
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        self.validation_policy
    }

    /// Active settings. Callers must treat the snapshot as read-only; to
    /// change settings, clone its configuration and call `set_configuration`.
    pub fn get_configuration(&self) -> SettingsSnapshot {
        self.store.get()
    }

    /// Settings for the web client, taken from the active configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::from(&*self.get_configuration())
    }

    /// Tracker built by the most recent configuration change.
    pub fn tracker(&self) -> Option<Arc<Tracker>> {
        self.tracker.load_full()
    }

    /// Replace the active configuration and tell clients about it.
    ///
    /// Do not call from inside a host callback that the host may issue while
    /// `set_configuration` itself is running; the writer lock is not reentrant.
    ///
    /// # Panics
    ///
    /// If `config` is the configuration that is already active (see
    /// [`ConfigStore::replace`]).
    pub fn set_configuration(&self, config: Arc<Configuration>) {
        if self.store.replace(config) == Replaced::Swapped {
            self.api.publish_websocket_event(
                CONFIG_CHANGE_EVENT,
                None,
                &WebsocketBroadcast::all(),
            );
        }
    }
}
