//! Standalone host for the Jitsi plugin configuration core.
//!
//! # Architecture Overview
//!
//! ```text
//!   settings.toml ──▶ FileHost ◀──────────── load / get_config / ids
//!        │                │                          │
//!   ConfigWatcher    publish events             ┌────┴────┐
//!        │                │                     │ Plugin  │── ConfigStore (ArcSwap)
//!        ▼                ▼                     └────┬────┘
//!   change notification  event log task             │
//!        └──────────────────────────────────────────▶ on_configuration_change
//!   SIGHUP ─────────────────────────────────────────▶ on_configuration_change
//!   SIGTERM / Ctrl-C ──▶ Shutdown ──▶ on_deactivate
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::broadcast;

use jitsi_plugin::config::watcher::ConfigWatcher;
use jitsi_plugin::host::{FileHost, HostEvent};
use jitsi_plugin::lifecycle::{self, HostSignal, Shutdown, ShutdownListener, SignalListener};
use jitsi_plugin::observability::logging::{init_logging, DEFAULT_LOG_FILTER};
use jitsi_plugin::telemetry::LogTelemetryClient;
use jitsi_plugin::{Plugin, ValidationPolicy};

#[derive(Parser)]
#[command(name = "jitsi-plugin-host")]
#[command(about = "Run the Jitsi plugin configuration core against a settings file", long_about = None)]
struct Cli {
    /// TOML file with `[server]` and `[plugin]` sections
    #[arg(short, long)]
    config: PathBuf,

    /// Reload when the settings file changes
    #[arg(short, long)]
    watch: bool,

    /// Reject settings that fail validation instead of applying them
    #[arg(long)]
    strict: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_filter)?;

    tracing::info!("jitsi-plugin-host v{} starting", env!("CARGO_PKG_VERSION"));

    let policy = if cli.strict {
        ValidationPolicy::Strict
    } else {
        ValidationPolicy::Lenient
    };

    let host = Arc::new(FileHost::new(&cli.config)?);
    let events = host.subscribe();
    let plugin = Arc::new(lifecycle::activate(
        host.clone(),
        Some(Arc::new(LogTelemetryClient::new())),
        policy,
    )?);

    let shutdown = Shutdown::new();
    let event_task = tokio::spawn(log_events(events, shutdown.subscribe()));

    let (watcher, mut changes) = ConfigWatcher::new(host.path());
    let _watch_handle = if cli.watch { Some(watcher.run()?) } else { None };

    let mut signals = SignalListener::new()?;
    loop {
        tokio::select! {
            Some(changed) = changes.recv(), if cli.watch => {
                tracing::info!(path = ?changed.path, "Settings file changed, reloading");
                notify_change(&plugin).await;
            }
            signal = signals.recv() => match signal {
                HostSignal::Reload => {
                    tracing::info!("SIGHUP received, reloading");
                    notify_change(&plugin).await;
                }
                HostSignal::Shutdown => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            },
        }
    }

    shutdown.trigger();
    let _ = event_task.await;
    plugin.on_deactivate()?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Run the change hook on a blocking thread, as a host would.
async fn notify_change(plugin: &Arc<Plugin>) {
    let plugin = Arc::clone(plugin);
    match tokio::task::spawn_blocking(move || plugin.on_configuration_change()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Configuration change rejected"),
        Err(e) => tracing::error!(error = %e, "Configuration change hook panicked"),
    }
}

async fn log_events(mut events: broadcast::Receiver<HostEvent>, mut shutdown: ShutdownListener) {
    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            received = events.recv() => match received {
                Ok(event) => tracing::info!(event = %event.event, "Event published to clients"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event log lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}
