//! Telemetry client that writes events to the log.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::telemetry::{TelemetryClient, TelemetryError, TrackedEvent};

/// Client used when running outside a real host: events go to `tracing`.
#[derive(Debug, Default)]
pub struct LogTelemetryClient {
    closed: AtomicBool,
}

impl LogTelemetryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl TelemetryClient for LogTelemetryClient {
    fn enqueue(&self, event: TrackedEvent) -> Result<(), TelemetryError> {
        if self.is_closed() {
            return Err(TelemetryError::Closed);
        }
        tracing::info!(
            event = %event.event,
            user_id = %event.user_id,
            properties = ?event.properties,
            "Telemetry event"
        );
        Ok(())
    }

    fn close(&self) -> Result<(), TelemetryError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(TelemetryError::Closed);
        }
        tracing::debug!("Telemetry client closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_close_is_terminal() {
        let client = LogTelemetryClient::new();
        let event = TrackedEvent {
            event: "jitsi_start_meeting".into(),
            user_id: "user1".into(),
            properties: BTreeMap::new(),
        };

        assert!(client.enqueue(event.clone()).is_ok());
        assert!(client.close().is_ok());
        assert!(client.is_closed());

        assert_eq!(client.enqueue(event), Err(TelemetryError::Closed));
        assert_eq!(client.close(), Err(TelemetryError::Closed));
    }
}
