//! Client configuration

use std::time::Duration;

/// Default catalog API deployment
pub const DEFAULT_BASE_URL: &str = "https://product-post-server.vercel.app";

/// Where toasts are anchored on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl std::str::FromStr for ToastPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "topright" => Ok(Self::TopRight),
            "topleft" => Ok(Self::TopLeft),
            "bottomright" => Ok(Self::BottomRight),
            "bottomleft" => Ok(Self::BottomLeft),
            other => Err(format!("unknown toast position: {other}")),
        }
    }
}

/// Client configuration for talking to the catalog API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:5000"), without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Whether the image URL is a required draft field
    pub require_image_url: bool,

    /// Toast auto-dismiss interval in milliseconds
    pub toast_duration_ms: u64,

    /// Toast anchor
    pub toast_position: ToastPosition,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: 30,
            require_image_url: true,
            toast_duration_ms: 2000,
            toast_position: ToastPosition::TopRight,
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let base_url =
            std::env::var("CATALOG_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let mut config = Self::new(base_url);

        if let Some(timeout) = env_parse("CATALOG_TIMEOUT_SECS") {
            config.timeout = timeout;
        }
        if let Some(required) = env_parse("CATALOG_REQUIRE_IMAGE_URL") {
            config.require_image_url = required;
        }
        if let Some(ms) = env_parse("CATALOG_TOAST_MS") {
            config.toast_duration_ms = ms;
        }
        if let Some(position) = env_parse("CATALOG_TOAST_POSITION") {
            config.toast_position = position;
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Require (or not) a non-empty image URL on submit
    pub fn with_require_image_url(mut self, required: bool) -> Self {
        self.require_image_url = required;
        self
    }

    /// Set the toast auto-dismiss interval
    pub fn with_toast_duration_ms(mut self, ms: u64) -> Self {
        self.toast_duration_ms = ms;
        self
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new("https://product-post-server.vercel.app/");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.require_image_url);
        assert_eq!(config.toast_duration(), Duration::from_millis(2000));
        assert_eq!(config.toast_position, ToastPosition::TopRight);
    }

    #[test]
    fn test_toast_position_parse() {
        assert_eq!("top-right".parse::<ToastPosition>(), Ok(ToastPosition::TopRight));
        assert_eq!(
            "Bottom_Left".parse::<ToastPosition>(),
            Ok(ToastPosition::BottomLeft)
        );
        assert!("middle".parse::<ToastPosition>().is_err());
    }
}
