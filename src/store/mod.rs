//! Catalog Store
//!
//! The document store holding catalog items sits behind the [`CatalogStore`]
//! trait so handlers and the checkout engine receive it by injection:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ CatalogStore│  ← trait object held by AppState
//! └──────┬──────┘
//!        │
//!   ┌────┴──────────────┐
//!   │                   │
//! MongoCatalogStore  InMemoryCatalogStore
//! ```

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;
use thiserror::Error;

use crate::catalog::models::{CatalogItem, NewCatalogItem};
use crate::catalog::query::CatalogFilter;

pub use memory::InMemoryCatalogStore;
pub use mongo::MongoCatalogStore;

/// Errors raised by a catalog store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Malformed document {id}: {reason}")]
    Malformed { id: String, reason: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Whether `id` is a syntactically valid store reference.
pub fn is_valid_id(id: &str) -> bool {
    ObjectId::parse_str(id).is_ok()
}

/// Operations the service needs from the catalog store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Number of catalog items.
    async fn count(&self) -> StoreResult<u64>;

    /// Stores new items, stamping identifiers and timestamps. Returns how
    /// many were written.
    async fn insert_many(&self, items: Vec<NewCatalogItem>) -> StoreResult<usize>;

    /// Up to `filter.limit` items matching `filter`, in store order.
    async fn find(&self, filter: &CatalogFilter) -> StoreResult<Vec<CatalogItem>>;

    /// Items whose identifier is in `ids`, in store order. Every id must
    /// already satisfy [`is_valid_id`].
    async fn find_by_ids(&self, ids: &[String]) -> StoreResult<Vec<CatalogItem>>;

    /// Atomically adds `by` to the item's download counter.
    async fn increment_downloads(&self, id: &str, by: u64) -> StoreResult<()>;

    /// Name of the backing database.
    fn database_name(&self) -> &str;

    /// Collections present in the backing database.
    async fn collection_names(&self) -> StoreResult<Vec<String>>;
}
