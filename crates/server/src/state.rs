//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::ReceiptStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the receipt store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Box<dyn ReceiptStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `store` - Where scored receipts are kept
    pub fn new(config: ServerConfig, store: impl ReceiptStore + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Box::new(store),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the receipt store.
    #[must_use]
    pub fn store(&self) -> &dyn ReceiptStore {
        self.inner.store.as_ref()
    }
}
