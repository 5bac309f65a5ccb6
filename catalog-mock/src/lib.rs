//! catalog-mock - in-memory catalog API
//!
//! Serves the four product routes from a [`ProductStore`], for local runs of
//! the catalog client and for its tests.

pub mod api;
pub mod logger;
pub mod state;

pub use api::router;
pub use state::{AppState, ProductStore};

use std::sync::Arc;

/// Router over `store`, with state applied
pub fn app(store: ProductStore) -> (Arc<AppState>, axum::Router) {
    let state = Arc::new(AppState::new(store));
    (state.clone(), router(state))
}
