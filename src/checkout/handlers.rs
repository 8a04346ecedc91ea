//! REST API handler for checkout

use axum::{extract::State, routing::post, Json, Router};

use super::{
    engine::checkout as run_checkout,
    helpers::format_receipt_summary,
    models::{CheckoutInput, Receipt},
};
use crate::error::Result;
use crate::state::SharedState;

/// Creates routes for checkout operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/checkout", post(checkout))
}

/// Endpoint: POST /checkout
/// Prices the requested items and returns a receipt.
async fn checkout(
    State(state): State<SharedState>,
    Json(payload): Json<CheckoutInput>,
) -> Result<Json<Receipt>> {
    let store = state.require_store()?;
    let receipt = run_checkout(store, &payload.items).await?;

    tracing::info!(
        order_id = %receipt.order_id,
        subtotal = %receipt.subtotal,
        "Checkout: {}",
        format_receipt_summary(&receipt)
    );

    Ok(Json(receipt))
}
