//! Data models
//!
//! Shared between the catalog client and the mock server (via API).

pub mod product;

// Re-exports
pub use product::*;
