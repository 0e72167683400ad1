//! Application state shared across handlers.

use std::sync::Arc;

use doughda_storage::Storage;

use crate::config::AdminConfig;
use crate::services::PasswordVerifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, storage and the password verifier.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    storage: Storage,
    passwords: PasswordVerifier,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, storage: Storage) -> Self {
        let passwords = PasswordVerifier::new(&config.admin_password);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                passwords,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the configured storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.inner.storage
    }

    /// Get the admin password verifier.
    #[must_use]
    pub fn passwords(&self) -> &PasswordVerifier {
        &self.inner.passwords
    }
}
