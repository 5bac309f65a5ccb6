// catalog-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory transport
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::http::{HttpClient, decode_body};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum [`Router`] through tower's `oneshot`, so the catalog
/// controller can run against an in-process server with no sockets.
///
/// # Example
///
/// ```ignore
/// use catalog_client::OneshotHttpClient;
///
/// let client = OneshotHttpClient::new(catalog_mock::router(store));
/// let products: Vec<Product> = client.get("/get-product").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// Wrap an initialised router (`with_state` already applied)
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn build_request(&self, method: http::Method, path: &str) -> ClientResult<Request<Body>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    fn build_request_with_body<B: serde::Serialize>(
        &self,
        method: http::Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Request<Body>> {
        let body_bytes = serde_json::to_vec(body)?;

        Request::builder()
            .method(method)
            .uri(path)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body_bytes))
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(ClientError::from_status(status, text));
        }

        decode_body(&body_bytes)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::GET, path)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request_with_body(http::Method::POST, path, body)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request_with_body(http::Method::PUT, path, body)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::DELETE, path)?;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_oneshot_round_trip() {
        let router = Router::new()
            .route("/ping", get(|| async { axum::Json(vec![1, 2, 3]) }))
            .route("/empty", get(|| async { "" }));
        let client = OneshotHttpClient::new(router);

        let numbers: Vec<u32> = client.get("/ping").await.unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);

        let _: serde::de::IgnoredAny = client.get("/empty").await.unwrap();

        let err = client.get::<Vec<u32>>("/missing").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }
}
