//! REST API handlers for the catalog
//!
//! `GET /schema`, `POST /seed` and `GET /models`.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::{
    models::{CatalogItem, SeedResponse},
    query::{CatalogFilter, ListQuery},
    schema::collections_document,
    seed::seed_demo_items,
};
use crate::error::Result;
use crate::state::SharedState;
use crate::store::CatalogStore;

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/schema", get(schema))
        .route("/seed", post(seed))
        .route("/models", get(list_models))
}

/// Endpoint: GET /schema
async fn schema() -> impl IntoResponse {
    Json(collections_document())
}

/// Endpoint: POST /seed
async fn seed(State(state): State<SharedState>) -> Result<Json<SeedResponse>> {
    let store = state.require_store()?;
    Ok(Json(seed_demo_items(store).await?))
}

/// Endpoint: GET /models
/// Lists catalog items; never fails, so a front end can demo without a store.
async fn list_models(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<CatalogItem>> {
    let filter = CatalogFilter::from(query);
    match state.store() {
        Some(store) => Json(list_items(store, &filter).await),
        None => Json(Vec::new()),
    }
}

/// Runs `filter` against `store`, answering with an empty list when the
/// store cannot be reached.
pub async fn list_items(store: &dyn CatalogStore, filter: &CatalogFilter) -> Vec<CatalogItem> {
    match store.find(filter).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog listing degraded to empty result");
            Vec::new()
        }
    }
}
