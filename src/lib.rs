//! 3D Character Shop Library
//!
//! This library provides the catalog listing, demo seeding and mock checkout
//! behind the character shop HTTP API.

// Domain modules
pub mod catalog;
pub mod checkout;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod store;
