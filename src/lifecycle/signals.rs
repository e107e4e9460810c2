//! OS signal handling.
//!
//! SIGTERM and Ctrl-C stop the host. SIGHUP (unix only) asks the plugin to
//! reload its settings, the same as a change notification from the host.

/// What a received signal means for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    Reload,
    Shutdown,
}

/// Registered signal handlers.
pub struct SignalListener {
    #[cfg(unix)]
    hangup: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl SignalListener {
    /// Register handlers. Must be called inside a Tokio runtime.
    pub fn new() -> std::io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                hangup: signal(SignalKind::hangup())?,
                terminate: signal(SignalKind::terminate())?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Wait for the next signal.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> HostSignal {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Ctrl-C handler failed");
                }
                HostSignal::Shutdown
            }
            _ = self.terminate.recv() => HostSignal::Shutdown,
            _ = self.hangup.recv() => HostSignal::Reload,
        }
    }

    /// Wait for the next signal.
    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> HostSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler failed");
        }
        HostSignal::Shutdown
    }
}
