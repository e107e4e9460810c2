//! Lifecycle management for the standalone host.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Build plugin → first change notification → ready (any error is fatal)
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown
//!     SIGHUP → change notification
//!
//! Shutdown (shutdown.rs):
//!     Trigger → background tasks stop → OnDeactivate → exit
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use signals::{HostSignal, SignalListener};
pub use startup::activate;
