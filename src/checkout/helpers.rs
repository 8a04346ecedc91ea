//! Checkout Business Logic Helpers
//!
//! Small pure functions used by the checkout engine.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::models::{CheckoutLineRequest, LineItem, Receipt};
use crate::catalog::models::CatalogItem;

/// Clamps a requested quantity to at least 1.
pub fn normalize_quantity(requested: i64) -> u64 {
    u64::try_from(requested.max(1)).unwrap_or(1)
}

/// Maps each requested id to its normalized quantity.
///
/// # Behaviour
///
/// * Repeated ids collapse into one entry holding the **last** quantity seen;
///   quantities are not summed.
/// * The returned id list keeps first-seen order and holds no duplicates.
/// * Ids are lower-cased. Object ids are hex, so `"65A1"` and `"65a1"` prefixes name
///   the same item and share one entry.
pub fn collapse_lines(lines: &[CheckoutLineRequest]) -> (Vec<String>, HashMap<String, u64>) {
    let mut order = Vec::new();
    let mut quantities = HashMap::new();

    for line in lines {
        let id = line.id.to_ascii_lowercase();
        let previous = quantities.insert(id.clone(), normalize_quantity(line.qty));
        if previous.is_none() {
            order.push(id);
        }
    }

    (order, quantities)
}

/// Returns a fresh order identifier.
pub fn new_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Prices `quantity` units of `item`.
///
/// Returns `None` when the line total does not fit in a `Decimal`.
pub fn price_line(item: &CatalogItem, quantity: u64) -> Option<LineItem> {
    let line_total = item.price.checked_mul(Decimal::from(quantity))?;

    Some(LineItem {
        id: item.id.clone(),
        name: item.name.clone(),
        quantity,
        unit_price: item.price,
        line_total,
        download_links: item
            .download_reference()
            .map(str::to_string)
            .into_iter()
            .collect(),
    })
}

/// Produces a human-readable one-line summary for a receipt.
///
/// Example output: `"2x Neon Runner, 1x Mech Scout"`.
pub fn format_receipt_summary(receipt: &Receipt) -> String {
    receipt
        .items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::NewCatalogItem;
    use chrono::Utc;

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(3), 3);
        assert_eq!(normalize_quantity(1), 1);
        assert_eq!(normalize_quantity(0), 1);
        assert_eq!(normalize_quantity(-7), 1);
    }

    #[test]
    fn test_collapse_lines_last_quantity_wins() {
        let lines = vec![
            CheckoutLineRequest::new("A", 1),
            CheckoutLineRequest::new("B", 0),
            CheckoutLineRequest::new("A", 3),
        ];
        let (order, quantities) = collapse_lines(&lines);
        assert_eq!(order, vec!["A", "B"]);
        assert_eq!(quantities["A"], 3);
        assert_eq!(quantities["B"], 1);
    }

    #[test]
    fn test_collapse_lines_ignores_id_case() {
        let lines = vec![
            CheckoutLineRequest::new("65A1F0C2B3D4E5F607182930", 2),
            CheckoutLineRequest::new("65a1f0c2b3d4e5f607182930", 4),
        ];
        let (order, quantities) = collapse_lines(&lines);
        assert_eq!(order, vec!["65a1f0c2b3d4e5f607182930"]);
        assert_eq!(quantities["65a1f0c2b3d4e5f607182930"], 4);
    }

    #[test]
    fn test_price_line() {
        let mut draft = NewCatalogItem::new("Neon Runner", Decimal::new(2950, 2));
        draft.thumbnail_url = Some("https://cdn.test/neon.png".into());
        let item = draft.into_item("abc".into(), Utc::now());

        let line = price_line(&item, 2).unwrap();
        assert_eq!(line.line_total, Decimal::new(5900, 2));
        assert_eq!(line.unit_price, Decimal::new(2950, 2));
        assert_eq!(line.download_links, vec!["https://cdn.test/neon.png"]);
    }

    #[test]
    fn test_price_line_overflow_is_none() {
        let item = NewCatalogItem::new("Titan", Decimal::from(10_000_000_000i64))
            .into_item("abc".into(), Utc::now());

        assert!(price_line(&item, i64::MAX as u64).is_none());
        assert!(price_line(&item, 3).is_some());
    }

    #[test]
    fn test_order_ids_are_unique() {
        assert_ne!(new_order_id(), new_order_id());
    }
}
