//! Catalog Domain Module
//!
//! This module contains the catalog of 3D character models, including:
//! - Domain models (CatalogItem, NewCatalogItem, SeedResponse)
//! - Listing filters built from query parameters
//! - Demo data seeding
//! - The JSON Schema served to the database viewer
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod query;
pub mod schema;
pub mod seed;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{CatalogItem, NewCatalogItem};
pub use query::{CatalogFilter, ListQuery};
