//! Typed catalog endpoints over any [`HttpClient`]

use crate::{ClientResult, HttpClient};
use serde::de::IgnoredAny;
use shared::{Product, ProductId, ProductPayload, routes};

/// The four catalog endpoints.
///
/// Mutations only report success: whatever the server echoes back is
/// discarded, since the collection is always re-read afterwards.
#[derive(Debug, Clone)]
pub struct ProductApi<C> {
    http: C,
}

impl<C: HttpClient> ProductApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &C {
        &self.http
    }

    /// `GET /get-product`
    pub async fn list(&self) -> ClientResult<Vec<Product>> {
        self.http.get(routes::LIST_PRODUCTS).await
    }

    /// `POST /post-product`
    pub async fn create(&self, payload: &ProductPayload) -> ClientResult<()> {
        let _: IgnoredAny = self.http.post(routes::CREATE_PRODUCT, payload).await?;
        Ok(())
    }

    /// `PUT /edit-product/{id}`
    pub async fn replace(&self, id: &ProductId, payload: &ProductPayload) -> ClientResult<()> {
        let _: IgnoredAny = self
            .http
            .put(&routes::edit_product(id.as_str()), payload)
            .await?;
        Ok(())
    }

    /// `DELETE /product-delete/{id}`
    pub async fn remove(&self, id: &ProductId) -> ClientResult<()> {
        let _: IgnoredAny = self
            .http
            .delete(&routes::delete_product(id.as_str()))
            .await?;
        Ok(())
    }
}
