//! Checkout Domain Module
//!
//! This module contains the mock checkout flow, including:
//! - Domain models (CheckoutLineRequest, LineItem, Receipt)
//! - Business logic helpers (quantity normalization, pricing, formatting)
//! - The checkout engine
//! - REST API handlers

pub mod engine;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use engine::checkout;
pub use handlers::routes;
pub use models::{CheckoutLineRequest, Receipt};
