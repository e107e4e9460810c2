//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! host change notification (startup, admin edit, file watcher)
//!     → loader.rs (fetch payload from host & deserialize)
//!     → validation.rs (semantic checks, link validity default)
//!     → Arc<Configuration> (fresh, never shared yet)
//!     → store.rs (atomic swap)
//!     → config_update event broadcast to clients
//!
//! request paths:
//!     store.get() → SettingsSnapshot (immutable, never torn)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once published; changes require a full reload
//! - All fields have defaults so a missing or partial payload still loads
//! - Validation separates syntactic (serde) from semantic checks

pub mod client;
pub mod loader;
pub mod schema;
pub mod store;
pub mod validation;
pub mod watcher;

pub use client::ClientConfig;
pub use loader::ConfigError;
pub use schema::{Configuration, JitsiSettings, NamingScheme};
pub use store::{ConfigStore, Replaced, SettingsSnapshot};
pub use validation::ValidationError;
