//! Catalog Domain Models
//!
//! Typed shapes for 3D character listings as stored in, and returned from,
//! the catalog store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

// =============================================================================
// Catalog Constants
// =============================================================================

/// Collection holding catalog items
pub const COLLECTION_NAME: &str = "charactermodel";
/// Upper bound of the rating scale
pub const MAX_RATING: f64 = 5.0;

/// File formats shipped with a model unless stated otherwise
pub fn default_formats() -> Vec<String> {
    ["FBX", "OBJ", "GLB"].iter().map(|f| f.to_string()).collect()
}

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// A catalog item as read back from the store
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogItem {
    /// Store-assigned identifier, exposed as a plain string
    pub id: String,

    pub name: String,

    pub description: Option<String>,

    /// Price in USD, never negative
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    pub thumbnail_url: Option<String>,

    /// 3D viewer or video preview
    pub preview_url: Option<String>,

    pub tags: Vec<String>,

    pub formats: Vec<String>,

    /// Free-form polycount descriptor, e.g. "25k tris"
    pub polycount: Option<String>,

    pub rigged: bool,

    pub animated: bool,

    /// Average rating within 0..=5
    pub rating: Option<f64>,

    /// Purchase counter; only ever increases
    pub downloads: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CatalogItem {
    /// Whether the item carries `tag` (exact, case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The single download reference handed out on checkout: the preview
    /// when there is one, otherwise the thumbnail.
    pub fn download_reference(&self) -> Option<&str> {
        self.preview_url
            .as_deref()
            .or(self.thumbnail_url.as_deref())
    }
}

/// A catalog item that has not been stored yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCatalogItem {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub preview_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    #[serde(default)]
    pub polycount: Option<String>,

    #[serde(default)]
    pub rigged: bool,

    #[serde(default)]
    pub animated: bool,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub downloads: u64,
}

impl NewCatalogItem {
    /// Creates a draft with every optional field at its default.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            thumbnail_url: None,
            preview_url: None,
            tags: Vec::new(),
            formats: default_formats(),
            polycount: None,
            rigged: false,
            animated: false,
            rating: None,
            downloads: 0,
        }
    }

    /// Checks the price and rating bounds.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidRequest("name must not be empty".into()));
        }
        if self.price < Decimal::ZERO {
            return Err(AppError::InvalidRequest(format!(
                "price must be >= 0 (got {})",
                self.price
            )));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(AppError::InvalidRequest(format!(
                    "rating must be within 0-5 (got {rating})"
                )));
            }
        }
        Ok(())
    }

    /// Attaches a store identifier and timestamps.
    pub fn into_item(self, id: String, now: DateTime<Utc>) -> CatalogItem {
        CatalogItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            thumbnail_url: self.thumbnail_url,
            preview_url: self.preview_url,
            tags: self.tags,
            formats: self.formats,
            polycount: self.polycount,
            rigged: self.rigged,
            animated: self.animated,
            rating: self.rating,
            downloads: self.downloads,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Response body of `POST /seed`
#[derive(Debug, Serialize, PartialEq)]
pub struct SeedResponse {
    pub seeded: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
