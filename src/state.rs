//! Application State
//!
//! Holds the catalog store handle created by `main` and hands it to every
//! handler through axum's `State` extractor.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::store::CatalogStore;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// `None` when no store is configured; reads degrade to empty results
    /// and writes report the store as unavailable.
    store: Option<Arc<dyn CatalogStore>>,

    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, store: Option<Arc<dyn CatalogStore>>) -> Self {
        Self { store, config }
    }

    /// State backed by `store` with default configuration.
    pub fn with_store(store: Arc<dyn CatalogStore>) -> Self {
        Self::new(AppConfig::default(), Some(store))
    }

    /// State with no store at all.
    pub fn without_store() -> Self {
        Self::new(AppConfig::default(), None)
    }

    pub fn store(&self) -> Option<&dyn CatalogStore> {
        self.store.as_deref()
    }

    /// The store, or `StoreUnavailable` for paths that cannot run without it.
    pub fn require_store(&self) -> Result<&dyn CatalogStore, AppError> {
        self.store().ok_or_else(AppError::store_not_configured)
    }
}
