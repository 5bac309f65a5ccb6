//! Catalog Client - keeps a local view of a remote product catalog in sync
//!
//! A draft form, a collection cache that is re-read after every mutation,
//! and a dispatcher that turns each user action into one request against the
//! catalog REST API.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod draft;
pub mod error;
pub mod notifier;
pub mod store;

pub use api::ProductApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::{ClientConfig, ToastPosition};
pub use controller::CatalogController;
pub use dispatcher::Dispatcher;
pub use draft::{Draft, FormState};
pub use error::{ClientError, ClientResult, Field, SyncError, ValidationError};
pub use notifier::{Notifier, Toast, ToastQueue, TracingNotifier};
pub use store::{Action, CatalogState, Command, Effect, Notice, NoticeLevel};

// Re-export shared types for convenience
pub use shared::{Product, ProductId, ProductPayload};
