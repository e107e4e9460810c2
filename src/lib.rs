//! Configuration core of the Jitsi chat plugin.
//!
//! Keeps one current configuration that host threads read concurrently and
//! that configuration change notifications replace atomically.

pub mod config;
pub mod host;
pub mod lifecycle;
pub mod observability;
pub mod plugin;
pub mod telemetry;

pub use config::{Configuration, ConfigStore, JitsiSettings, SettingsSnapshot};
pub use host::PluginApi;
pub use plugin::{Plugin, PluginError, ValidationPolicy};
