//! Metrics collection.
//!
//! # Metrics
//! - `plugin_config_reloads_total` (counter): change notifications by outcome
//! - `plugin_config_validation_failures_total` (counter): settings that failed validation
//! - `plugin_telemetry_close_failures_total` (counter): telemetry client close errors

/// Outcome label for a configuration change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Applied,
    LoadFailed,
    Rejected,
}

impl ReloadOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadOutcome::Applied => "applied",
            ReloadOutcome::LoadFailed => "load_failed",
            ReloadOutcome::Rejected => "rejected",
        }
    }
}

pub fn record_config_reload(outcome: ReloadOutcome) {
    metrics::counter!("plugin_config_reloads_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_validation_failure() {
    metrics::counter!("plugin_config_validation_failures_total").increment(1);
}

pub fn record_telemetry_close_failure() {
    metrics::counter!("plugin_telemetry_close_failures_total").increment(1);
}
