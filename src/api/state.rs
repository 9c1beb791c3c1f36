//! Application state for the Pay Period Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::RecordStore;

/// Shared application state.
///
/// Contains resources shared across all request handlers: the loaded
/// engine configuration and the record-store capability.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The record store behind the engine.
    store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, store: Arc<dyn RecordStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}
