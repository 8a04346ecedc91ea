//! In-process catalog store
//!
//! Keeps items in a `DashMap` so concurrent requests need no external
//! locking. Used by the test-suite and for running the API without MongoDB.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use dashmap::DashMap;

use super::{CatalogStore, StoreError, StoreResult};
use crate::catalog::models::{CatalogItem, NewCatalogItem, COLLECTION_NAME};
use crate::catalog::query::CatalogFilter;

pub struct InMemoryCatalogStore {
    /// Items keyed by their hex object id.
    items: DashMap<String, CatalogItem>,
    name: String,
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            name: "memory".to_string(),
        }
    }

    /// Looks up a single item.
    pub fn get(&self, id: &str) -> Option<CatalogItem> {
        self.items.get(id).map(|entry| entry.value().clone())
    }

    /// Snapshot in insertion order. Object ids generated by one process sort
    /// by creation.
    fn snapshot(&self) -> Vec<CatalogItem> {
        let mut items: Vec<CatalogItem> = self
            .items
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn count(&self) -> StoreResult<u64> {
        Ok(self.items.len() as u64)
    }

    async fn insert_many(&self, items: Vec<NewCatalogItem>) -> StoreResult<usize> {
        let now = Utc::now();
        let inserted = items.len();
        for draft in items {
            let id = ObjectId::new().to_hex();
            self.items.insert(id.clone(), draft.into_item(id, now));
        }
        Ok(inserted)
    }

    async fn find(&self, filter: &CatalogFilter) -> StoreResult<Vec<CatalogItem>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|item| filter.matches(item))
            .take(filter.limit as usize)
            .collect())
    }

    async fn find_by_ids(&self, ids: &[String]) -> StoreResult<Vec<CatalogItem>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|item| ids.contains(&item.id))
            .collect())
    }

    async fn increment_downloads(&self, id: &str, by: u64) -> StoreResult<()> {
        let mut entry = self
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError::Unavailable(format!("no catalog item {id}")))?;
        entry.downloads = entry.downloads.saturating_add(by);
        entry.updated_at = Some(Utc::now());
        Ok(())
    }

    fn database_name(&self) -> &str {
        &self.name
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(vec![COLLECTION_NAME.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn drafts(names: &[&str]) -> Vec<NewCatalogItem> {
        names
            .iter()
            .map(|n| NewCatalogItem::new(*n, Decimal::ONE))
            .collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_timestamps() {
        let store = InMemoryCatalogStore::new();
        let inserted = store.insert_many(drafts(&["A", "B"])).await.unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(store.count().await.unwrap(), 2);

        let items = store.find(&CatalogFilter::default()).await.unwrap();
        assert_eq!(items.len(), 2);
        for item in &items {
            assert!(crate::store::is_valid_id(&item.id));
            assert!(item.created_at.is_some());
        }
    }

    #[tokio::test]
    async fn test_find_respects_limit_and_filter() {
        let store = InMemoryCatalogStore::new();
        store
            .insert_many(drafts(&["Neon Runner", "Neon Drifter", "Mech Scout"]))
            .await
            .unwrap();

        let filter = CatalogFilter::default().with_text("neon").with_limit(1);
        let items = store.find(&filter).await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].name.starts_with("Neon"));
    }

    #[tokio::test]
    async fn test_increment_downloads() {
        let store = InMemoryCatalogStore::new();
        store.insert_many(drafts(&["Counter"])).await.unwrap();
        let id = store.find(&CatalogFilter::default()).await.unwrap()[0]
            .id
            .clone();

        store.increment_downloads(&id, 2).await.unwrap();
        store.increment_downloads(&id, 3).await.unwrap();
        assert_eq!(store.get(&id).unwrap().downloads, 5);

        let missing = ObjectId::new().to_hex();
        assert!(store.increment_downloads(&missing, 1).await.is_err());
    }
}
