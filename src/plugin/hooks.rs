//! Host lifecycle hooks.

use std::sync::Arc;

use crate::config::loader::load_configuration;
use crate::observability::metrics::{self, ReloadOutcome};
use crate::plugin::{Plugin, PluginError, ValidationPolicy, MANIFEST, TELEMETRY_SHORT_NAME};
use crate::telemetry::{Tracker, TrackerIdentity};

impl Plugin {
    /// Invoked by the host whenever the plugin settings may have changed,
    /// including once at activation.
    ///
    /// The telemetry tracker is rebuilt whenever loading succeeds, even if the
    /// settings are then rejected. On error the previously active
    /// configuration stays in place.
    pub fn on_configuration_change(&self) -> Result<(), PluginError> {
        let mut configuration = match load_configuration(self.api.as_ref()) {
            Ok(configuration) => configuration,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load plugin configuration, keeping current");
                metrics::record_config_reload(ReloadOutcome::LoadFailed);
                return Err(PluginError::LoadConfiguration(e));
            }
        };

        let enable_diagnostics = self
            .api
            .get_config()
            .map(|config| config.diagnostics_enabled())
            .unwrap_or(false);

        let identity = TrackerIdentity {
            diagnostic_id: self.api.get_diagnostic_id(),
            server_version: self.api.get_server_version(),
            plugin_id: MANIFEST.id.to_string(),
            plugin_version: MANIFEST.version.to_string(),
            telemetry_short_name: TELEMETRY_SHORT_NAME.to_string(),
        };
        self.tracker.store(Some(Arc::new(Tracker::new(
            self.telemetry_client.clone(),
            identity,
            enable_diagnostics,
        ))));

        if let Err(e) = configuration.jitsi_settings.is_valid() {
            metrics::record_validation_failure();
            match self.validation_policy {
                ValidationPolicy::Strict => {
                    tracing::error!(error = %e, "Rejecting invalid plugin configuration");
                    metrics::record_config_reload(ReloadOutcome::Rejected);
                    return Err(PluginError::InvalidConfiguration(e));
                }
                ValidationPolicy::Lenient => {
                    tracing::warn!(error = %e, "Plugin configuration is invalid, applying anyway");
                }
            }
        }

        let settings = &configuration.jitsi_settings;
        tracing::info!(
            jitsi_url = %settings.jitsi_url(),
            jwt = settings.jitsi_jwt,
            embedded = settings.jitsi_embedded,
            use_jaas = settings.use_jaas,
            naming_scheme = %settings.naming_scheme(),
            enable_diagnostics,
            "Applying plugin configuration"
        );

        self.set_configuration(Arc::new(configuration));
        metrics::record_config_reload(ReloadOutcome::Applied);
        Ok(())
    }

    /// Invoked once when the plugin is disabled. Never fails.
    pub fn on_deactivate(&self) -> Result<(), PluginError> {
        if let Some(client) = &self.telemetry_client {
            if let Err(e) = client.close() {
                tracing::warn!(error = %e, "OnDeactivate: failed to close telemetry client");
                metrics::record_telemetry_close_failure();
            }
        }
        Ok(())
    }
}
