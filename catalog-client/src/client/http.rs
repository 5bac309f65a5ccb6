// catalog-client/src/client/http.rs
// HTTP client - network transport

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Body used when the server acknowledges with no content
const EMPTY_BODY: &[u8] = b"null";

/// Decode a response body, treating an empty body as JSON `null`.
///
/// Mutation endpoints answer with either the stored product or a bare ack,
/// so callers that only care about success decode into
/// [`serde::de::IgnoredAny`].
pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let body = if bytes.iter().all(u8::is_ascii_whitespace) {
        EMPTY_BODY
    } else {
        bytes
    };
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

// ============================================================================
// HttpClient trait
// ============================================================================

/// HTTP client trait (统一请求接口)
///
/// `path` always starts with `/` and is relative to the API base URL.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

// ============================================================================
// Network client (reqwest)
// ============================================================================

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ClientError::from_status(status, text));
        }
        let bytes = response.bytes().await?;
        decode_body(&bytes)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("PUT {}", url);
        let response = self.client.put(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IgnoredAny;

    #[test]
    fn test_url_join() {
        let client = NetworkHttpClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/get-product"), "http://localhost:5000/get-product");
    }

    #[test]
    fn test_empty_body_is_an_ack() {
        let _: IgnoredAny = decode_body(b"").unwrap();
        let _: IgnoredAny = decode_body(b"  \n").unwrap();
        let _: IgnoredAny = decode_body(br#"{"acknowledged":true}"#).unwrap();
        let parsed: Option<u32> = decode_body(b"").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_garbage_body_is_invalid_response() {
        let err = decode_body::<Vec<u32>>(b"<html>").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
