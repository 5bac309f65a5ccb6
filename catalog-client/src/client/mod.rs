//! Client module - HTTP transports for the catalog API.
//!
//! [`HttpClient`] is the seam the rest of the crate is generic over:
//! [`NetworkHttpClient`] talks to a real deployment, and
//! `OneshotHttpClient` (feature "in-process") calls an axum router in memory.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

// Re-export main types
pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
