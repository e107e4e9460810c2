//! Synchronized holder for the active configuration.
//!
//! # Design Decisions
//! - Readers load the current `Arc<Configuration>` without locking
//! - Writers are serialized by a mutex that covers only the identity check and
//!   the pointer store; loading and validation happen before, notification after
//! - Replacing the active configuration with itself is a caller bug and panics

use std::ops::Deref;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;

use crate::config::schema::{Configuration, JitsiSettings};

/// Immutable view of the settings that were active when it was taken.
///
/// Holding a snapshot keeps its configuration alive after a newer one has
/// been published.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    config: Arc<Configuration>,
}

impl SettingsSnapshot {
    /// The wrapper this snapshot reads from.
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.config
    }
}

impl Deref for SettingsSnapshot {
    type Target = JitsiSettings;

    fn deref(&self) -> &JitsiSettings {
        &self.config.jitsi_settings
    }
}

/// Outcome of [`ConfigStore::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replaced {
    /// The new configuration is now active.
    Swapped,
    /// The empty configuration was handed back in; nothing changed.
    Unchanged,
}

/// Owner of the single active configuration.
pub struct ConfigStore {
    active: ArcSwapOption<Configuration>,
    write_lock: Mutex<()>,
    empty: Arc<Configuration>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            active: ArcSwapOption::empty(),
            write_lock: Mutex::new(()),
            empty: Arc::new(Configuration::default()),
        }
    }

    /// Current settings. Zero-valued settings before the first replace.
    pub fn get(&self) -> SettingsSnapshot {
        let config = self
            .active
            .load_full()
            .unwrap_or_else(|| Arc::clone(&self.empty));
        SettingsSnapshot { config }
    }

    /// Whether any configuration has been published yet.
    pub fn is_loaded(&self) -> bool {
        self.active.load().is_some()
    }

    /// Publish `config` as the active configuration.
    ///
    /// Must not be called while the caller is already inside `replace`
    /// (the writer lock is not reentrant).
    ///
    /// # Panics
    ///
    /// If `config` is the very allocation that is already active and it holds
    /// anything but zero values. That means the caller mutated the live
    /// configuration instead of cloning it.
    pub fn replace(&self, config: Arc<Configuration>) -> Replaced {
        // Poisoning only means another writer panicked on the aliasing check;
        // the stored pointer itself is always consistent.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let current = self.active.load();
        if let Some(current) = &*current {
            if Arc::ptr_eq(current, &config) {
                if config.is_empty() {
                    return Replaced::Unchanged;
                }
                panic!("replace called with the existing configuration");
            }
        }

        self.active.store(Some(config));
        Replaced::Swapped
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
