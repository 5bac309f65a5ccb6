//! Shared types for the product catalog
//!
//! Wire model and route table used by both the catalog client and the
//! in-memory mock server.

pub mod models;
pub mod routes;

// Re-exports
pub use models::{Product, ProductId, ProductPayload};
