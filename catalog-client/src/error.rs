//! Client error types

use std::fmt;
use thiserror::Error;

/// Transport-level error for a single catalog request
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the server (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-2xx status
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a non-success status and its body to an error
    pub fn from_status(status: http::StatusCode, body: String) -> Self {
        match status {
            http::StatusCode::NOT_FOUND => Self::NotFound(body),
            http::StatusCode::BAD_REQUEST => Self::Validation(body),
            _ => Self::Status {
                status: status.as_u16(),
                body,
            },
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Draft field, as named in validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Description,
    ImageUrl,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Description => "description",
            Field::ImageUrl => "image URL",
        })
    }
}

/// Local validation failure, detected before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(Field),

    #[error("price is not a number: {0:?}")]
    InvalidPrice(String),
}

/// Outcome of a user-triggered catalog operation
#[derive(Debug, Error)]
pub enum SyncError {
    /// Rejected locally, no request issued
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request failed or the server answered non-2xx
    #[error("network error: {0}")]
    Network(#[from] ClientError),

    /// Another request is still in flight
    #[error("another request is in flight")]
    Busy,

    /// Update submitted with no product open for editing
    #[error("no product is open for editing")]
    NotEditing,
}
