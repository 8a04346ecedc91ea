//! Checkout Domain Models
//!
//! Request and receipt shapes for `POST /checkout`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Checkout Constants
// =============================================================================

/// Message attached to every receipt
pub const CONFIRMATION_MESSAGE: &str = "Order confirmed. Download links are ready.";

// =============================================================================
// Checkout Domain Models
// =============================================================================

/// Returns the default quantity (1) for checkout lines
fn default_quantity() -> i64 {
    1
}

/// One requested purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutLineRequest {
    /// Catalog item identifier
    pub id: String,

    /// Requested quantity; anything below 1 is treated as 1
    #[serde(default = "default_quantity")]
    pub qty: i64,
}

impl CheckoutLineRequest {
    pub fn new(id: impl Into<String>, qty: i64) -> Self {
        Self { id: id.into(), qty }
    }
}

/// Body of `POST /checkout`
#[derive(Debug, Deserialize)]
pub struct CheckoutInput {
    pub items: Vec<CheckoutLineRequest>,
}

/// A priced line on a receipt
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineItem {
    pub id: String,

    pub name: String,

    /// Resolved quantity, always at least 1
    #[serde(rename = "qty")]
    pub quantity: u64,

    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,

    /// Placeholder download references; real signed URLs are not issued
    pub download_links: Vec<String>,
}

/// Outcome of a checkout. Receipts are returned to the caller and never
/// persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Receipt {
    pub order_id: String,

    pub items: Vec<LineItem>,

    /// Sum of every `line_total`
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    pub message: String,
}
