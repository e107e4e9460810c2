//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration core produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (reload and failure counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Metrics go through the `metrics` facade; no exporter is started here

pub mod logging;
pub mod metrics;
