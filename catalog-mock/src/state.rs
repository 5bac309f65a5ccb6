use axum::http::StatusCode;
use shared::{Product, ProductId, ProductPayload};
use std::sync::Mutex;
use tokio::sync::RwLock;
use tracing::info;

pub struct AppState {
    pub product_store: ProductStore,
}

impl AppState {
    pub fn new(product_store: ProductStore) -> Self {
        Self { product_store }
    }
}

/// In-memory product collection, in insertion order.
///
/// Also records every request it serves and can be told to fail the next
/// one, so clients can be tested against server errors.
#[derive(Default)]
pub struct ProductStore {
    products: RwLock<Vec<Product>>,
    fail_next: Mutex<Option<StatusCode>>,
    request_log: Mutex<Vec<String>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            ..Default::default()
        }
    }

    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn insert(&self, payload: ProductPayload) -> Product {
        let product = payload.into_product(ProductId::new(uuid::Uuid::new_v4().to_string()));
        info!("Created product {} ({})", product.id, product.name);
        self.products.write().await.push(product.clone());
        product
    }

    /// Replace in place; `None` if no product has `id`
    pub async fn replace(&self, id: &str, payload: ProductPayload) -> Option<Product> {
        let mut products = self.products.write().await;
        let slot = products.iter_mut().find(|p| p.id.as_str() == id)?;
        *slot = payload.into_product(slot.id.clone());
        info!("Replaced product {}", id);
        Some(slot.clone())
    }

    pub async fn remove(&self, id: &str) -> Option<Product> {
        let mut products = self.products.write().await;
        let index = products.iter().position(|p| p.id.as_str() == id)?;
        info!("Removed product {}", id);
        Some(products.remove(index))
    }

    /// Answer the next request, whatever the route, with `status`
    pub fn fail_next(&self, status: StatusCode) {
        *self.fail_next.lock().unwrap_or_else(|e| e.into_inner()) = Some(status);
    }

    pub(crate) fn take_failure(&self) -> Option<StatusCode> {
        self.fail_next.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub(crate) fn record(&self, method: &str, path: &str) {
        self.request_log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format!("{} {}", method, path));
    }

    /// Requests served so far, as `"METHOD /path"`
    pub fn requests(&self) -> Vec<String> {
        self.request_log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of served requests matching `"METHOD /path"`
    pub fn count(&self, request: &str) -> usize {
        self.requests().iter().filter(|r| *r == request).count()
    }
}
