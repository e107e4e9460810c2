//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: a plugin whose first configuration cannot be loaded is not
//!   activated

use std::sync::Arc;

use crate::host::PluginApi;
use crate::plugin::{Plugin, PluginError, ValidationPolicy};
use crate::telemetry::TelemetryClient;

/// Build the plugin and deliver the activation-time change notification.
pub fn activate(
    api: Arc<dyn PluginApi>,
    telemetry_client: Option<Arc<dyn TelemetryClient>>,
    policy: ValidationPolicy,
) -> Result<Plugin, PluginError> {
    let mut plugin = Plugin::new(api).with_validation_policy(policy);
    if let Some(client) = telemetry_client {
        plugin = plugin.with_telemetry_client(client);
    }

    plugin.on_configuration_change()?;
    tracing::info!(
        plugin_id = crate::plugin::MANIFEST.id,
        version = crate::plugin::MANIFEST.version,
        "Plugin activated"
    );
    Ok(plugin)
}
