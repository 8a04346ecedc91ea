//! MongoDB catalog store
//!
//! Documents in the `charactermodel` collection are decoded into a private
//! [`StoredItem`] record and then converted into [`CatalogItem`] explicitly;
//! documents that do not fit the catalog shape are skipped with a warning
//! rather than handed to callers half-parsed.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{Client, Collection, Database};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogStore, StoreError, StoreResult};
use crate::catalog::models::{
    default_formats, CatalogItem, NewCatalogItem, COLLECTION_NAME, MAX_RATING,
};
use crate::catalog::query::CatalogFilter;
use crate::config::DatabaseConfig;

/// Characters with a meaning inside a PCRE pattern
const REGEX_METACHARACTERS: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$', '#', '-',
];

/// Catalog item as laid out in MongoDB
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,

    name: String,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    price: f64,

    #[serde(default)]
    thumbnail_url: Option<String>,

    #[serde(default)]
    preview_url: Option<String>,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(default = "default_formats")]
    formats: Vec<String>,

    #[serde(default)]
    polycount: Option<String>,

    #[serde(default)]
    rigged: bool,

    #[serde(default)]
    animated: bool,

    #[serde(default)]
    rating: Option<f64>,

    #[serde(default)]
    downloads: i64,

    #[serde(default)]
    created_at: Option<bson::DateTime>,

    #[serde(default)]
    updated_at: Option<bson::DateTime>,
}

impl StoredItem {
    fn from_new(item: NewCatalogItem, now: bson::DateTime) -> Self {
        Self {
            id: None,
            name: item.name,
            description: item.description,
            price: item.price.to_f64().unwrap_or_default(),
            thumbnail_url: item.thumbnail_url,
            preview_url: item.preview_url,
            tags: item.tags,
            formats: item.formats,
            polycount: item.polycount,
            rigged: item.rigged,
            animated: item.animated,
            rating: item.rating,
            downloads: i64::try_from(item.downloads).unwrap_or(i64::MAX),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn into_item(self) -> StoreResult<CatalogItem> {
        let id = self
            .id
            .map(|oid| oid.to_hex())
            .ok_or_else(|| malformed("<missing>", "document has no _id"))?;

        let price = Decimal::from_f64(self.price)
            .filter(|p| *p >= Decimal::ZERO)
            .ok_or_else(|| malformed(&id, format!("invalid price {}", self.price)))?;

        let downloads = u64::try_from(self.downloads)
            .map_err(|_| malformed(&id, format!("negative downloads {}", self.downloads)))?;

        if let Some(rating) = self.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(malformed(&id, format!("rating {rating} outside 0-5")));
            }
        }

        Ok(CatalogItem {
            id,
            name: self.name,
            description: self.description,
            price,
            thumbnail_url: self.thumbnail_url,
            preview_url: self.preview_url,
            tags: self.tags,
            formats: self.formats,
            polycount: self.polycount,
            rigged: self.rigged,
            animated: self.animated,
            rating: self.rating,
            downloads,
            created_at: self.created_at.map(|d| d.to_chrono()),
            updated_at: self.updated_at.map(|d| d.to_chrono()),
        })
    }
}

fn malformed(id: &str, reason: impl Into<String>) -> StoreError {
    StoreError::Malformed {
        id: id.to_string(),
        reason: reason.into(),
    }
}

/// Escapes `text` so MongoDB's `$regex` treats it as a literal substring.
pub fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if REGEX_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Translates a [`CatalogFilter`] into a MongoDB query document.
pub fn filter_document(filter: &CatalogFilter) -> Document {
    let mut query = Document::new();

    if let Some(tag) = &filter.tag {
        query.insert("tags", doc! { "$in": [tag.as_str()] });
    }

    if let Some(text) = &filter.text {
        let pattern = escape_regex(text);
        query.insert(
            "$or",
            vec![
                doc! { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
            ],
        );
    }

    query
}

/// Decodes a raw document, logging and dropping it when it does not fit.
fn decode(raw: Document) -> Option<CatalogItem> {
    let raw_id = raw
        .get_object_id("_id")
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    let decoded = bson::from_document::<StoredItem>(raw)
        .map_err(|e| malformed(&raw_id, e.to_string()))
        .and_then(StoredItem::into_item);

    match decoded {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed catalog document");
            None
        }
    }
}

pub struct MongoCatalogStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoCatalogStore {
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Builds a client for `config`. The driver connects lazily, so an
    /// unreachable server surfaces on the first operation.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.url).await?;
        Ok(Self::new(&client.database(&config.name)))
    }

    async fn collect(&self, query: Document, limit: Option<i64>) -> StoreResult<Vec<CatalogItem>> {
        let mut find = self.collection.find(query);
        if let Some(limit) = limit {
            find = find.limit(limit);
        }
        let mut cursor = find.await?;

        let mut items = Vec::new();
        while let Some(raw) = cursor.try_next().await? {
            items.extend(decode(raw));
        }
        Ok(items)
    }
}

#[async_trait]
impl CatalogStore for MongoCatalogStore {
    async fn count(&self) -> StoreResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn insert_many(&self, items: Vec<NewCatalogItem>) -> StoreResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        let now = bson::DateTime::from_chrono(Utc::now());
        let documents = items
            .into_iter()
            .map(|item| bson::to_document(&StoredItem::from_new(item, now)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| malformed("<new>", e.to_string()))?;

        let result = self.collection.insert_many(documents).await?;
        Ok(result.inserted_ids.len())
    }

    async fn find(&self, filter: &CatalogFilter) -> StoreResult<Vec<CatalogItem>> {
        self.collect(filter_document(filter), Some(i64::from(filter.limit)))
            .await
    }

    async fn find_by_ids(&self, ids: &[String]) -> StoreResult<Vec<CatalogItem>> {
        let object_ids: Vec<ObjectId> = ids
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();
        if object_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collect(doc! { "_id": { "$in": object_ids } }, None).await
    }

    async fn increment_downloads(&self, id: &str, by: u64) -> StoreResult<()> {
        let oid = ObjectId::parse_str(id).map_err(|e| malformed(id, e.to_string()))?;
        let by = i64::try_from(by).unwrap_or(i64::MAX);

        self.collection
            .update_one(
                doc! { "_id": oid },
                doc! {
                    "$inc": { "downloads": by },
                    "$set": { "updated_at": bson::DateTime::from_chrono(Utc::now()) },
                },
            )
            .await?;
        Ok(())
    }

    fn database_name(&self) -> &str {
        self.database.name()
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.database.list_collection_names().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("neon"), "neon");
        assert_eq!(escape_regex("a.b*c"), "a\\.b\\*c");
        assert_eq!(escape_regex("sci-fi (v2)"), "sci\\-fi \\(v2\\)");
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(filter_document(&CatalogFilter::default()).is_empty());
    }

    #[test]
    fn test_filter_document_shape() {
        let filter = CatalogFilter::default().with_tag("fantasy").with_text("neon");
        let query = filter_document(&filter);

        assert_eq!(
            query.get_document("tags").unwrap(),
            &doc! { "$in": ["fantasy"] }
        );

        let or = query.get_array("$or").unwrap();
        assert_eq!(or.len(), 2);
        assert_eq!(
            or[0],
            Bson::Document(doc! { "name": { "$regex": "neon", "$options": "i" } })
        );
        assert_eq!(
            or[1],
            Bson::Document(doc! { "description": { "$regex": "neon", "$options": "i" } })
        );
    }

    #[test]
    fn test_decode_well_formed_document() {
        let oid = ObjectId::new();
        let created = bson::DateTime::from_millis(1_714_566_600_000);
        let raw = doc! {
            "_id": oid,
            "name": "Neon Runner",
            "price": 29.0,
            "tags": ["cyberpunk"],
            "rigged": true,
            "rating": 4.6,
            "downloads": 3_i32,
            "created_at": created,
        };

        let item = decode(raw).unwrap();
        assert_eq!(item.id, oid.to_hex());
        assert_eq!(item.price, Decimal::from(29));
        assert_eq!(item.formats, vec!["FBX", "OBJ", "GLB"]);
        assert_eq!(item.downloads, 3);
        assert_eq!(
            item.created_at.unwrap().to_rfc3339(),
            "2024-05-01T12:30:00+00:00"
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range_documents() {
        let negative_price = doc! { "_id": ObjectId::new(), "name": "Bad", "price": -1.0 };
        assert!(decode(negative_price).is_none());

        let bad_rating =
            doc! { "_id": ObjectId::new(), "name": "Bad", "price": 1.0, "rating": 9.0 };
        assert!(decode(bad_rating).is_none());

        let no_name = doc! { "_id": ObjectId::new(), "price": 1.0 };
        assert!(decode(no_name).is_none());
    }

    #[test]
    fn test_stored_item_round_trips_through_bson() {
        let mut draft = NewCatalogItem::new("Mech Scout", Decimal::from(24));
        draft.tags = vec!["mech".into()];
        let now = bson::DateTime::now();

        let mut document = bson::to_document(&StoredItem::from_new(draft, now)).unwrap();
        assert!(document.get("_id").is_none());
        assert_eq!(document.get_f64("price").unwrap(), 24.0);

        document.insert("_id", ObjectId::new());
        let item = decode(document).unwrap();
        assert_eq!(item.name, "Mech Scout");
        assert_eq!(item.tags, vec!["mech"]);
        assert!(item.updated_at.is_some());
    }
}
