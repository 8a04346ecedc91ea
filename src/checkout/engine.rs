//! Checkout engine
//!
//! Resolves requested items against the catalog store, prices a receipt and
//! then bumps their download counters.
//!
//! The receipt is fully priced before any counter is touched, so a rejected
//! order leaves the catalog unchanged. The increments themselves are not
//! transactional. A failed increment is logged and the sale goes through.

use rust_decimal::Decimal;

use super::helpers::{collapse_lines, new_order_id, price_line};
use super::models::{CheckoutLineRequest, Receipt, CONFIRMATION_MESSAGE};
use crate::error::{AppError, Result};
use crate::store::{is_valid_id, CatalogStore};

/// Runs a checkout for `lines` against `store`.
///
/// # Errors
///
/// * `InvalidRequest` when `lines` is empty.
/// * `NotFound` when no requested id resolves to a stored item. Malformed ids
///   are dropped silently before the lookup.
/// * `InvalidRequest` when a line total or the subtotal overflows.
/// * `StoreUnavailable` when the lookup itself fails.
pub async fn checkout(
    store: &dyn CatalogStore,
    lines: &[CheckoutLineRequest],
) -> Result<Receipt> {
    if lines.is_empty() {
        return Err(AppError::InvalidRequest("No items in checkout".to_string()));
    }

    let (requested, quantities) = collapse_lines(lines);
    let ids: Vec<String> = requested.into_iter().filter(|id| is_valid_id(id)).collect();

    let found = if ids.is_empty() {
        Vec::new()
    } else {
        store.find_by_ids(&ids).await?
    };
    if found.is_empty() {
        return Err(AppError::NotFound("Models not found".to_string()));
    }

    let quantity_of = |id: &str| quantities.get(id).copied().unwrap_or(1);
    let too_large = || AppError::InvalidRequest("Order total too large".to_string());

    let items = found
        .iter()
        .map(|item| price_line(item, quantity_of(&item.id)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(too_large)?;
    let subtotal = items
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.line_total))
        .ok_or_else(too_large)?;

    for line in &items {
        if let Err(e) = store.increment_downloads(&line.id, line.quantity).await {
            tracing::warn!(
                item_id = %line.id,
                error = %e,
                "Download counter update failed; continuing checkout"
            );
        }
    }

    Ok(Receipt {
        order_id: new_order_id(),
        items,
        subtotal,
        message: CONFIRMATION_MESSAGE.to_string(),
    })
}
