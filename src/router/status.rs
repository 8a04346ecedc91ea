//! Liveness and store diagnostics

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::SharedState;

/// How many collection names `/test` reports
const MAX_LISTED_COLLECTIONS: usize = 10;

/// Longest error excerpt shown by `/test`
const MAX_ERROR_CHARS: usize = 50;

/// Creates routes for status endpoints
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(root))
        .route("/test", get(test_database))
}

/// Human-readable connectivity report returned by `GET /test`
#[derive(Debug, Serialize)]
pub struct DatabaseReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Endpoint: GET /
async fn root() -> Json<Value> {
    Json(json!({ "message": "3D Character Shop API running" }))
}

/// Endpoint: GET /test
/// Store connectivity diagnostic; not meant for programmatic use.
async fn test_database(State(state): State<SharedState>) -> Json<DatabaseReport> {
    let mut report = DatabaseReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_marker(state.config.database_url_set),
        database_name: set_marker(state.config.database_name_set),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(store) = state.store() else {
        report.database = "⚠️  Available but not initialized".to_string();
        return Json(report);
    };

    report.connection_status = "Connected".to_string();
    match store.collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            report.collections = names;
            report.database = format!("✅ Connected & Working ({})", store.database_name());
        }
        Err(e) => {
            let excerpt: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            tracing::warn!(error = %e, "Store diagnostic failed");
            report.database = format!("⚠️  Connected but Error: {excerpt}");
        }
    }

    Json(report)
}

fn set_marker(set: bool) -> String {
    let marker = if set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}
