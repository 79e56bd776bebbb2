//! API Port - Typed HTTP boundary used by application services
//!
//! `ApiPort` is generic over request/response types, so it is not object-safe.
//! Adapters implement [`RawApiPort`](super::RawApiPort) instead and the
//! application layer provides the typed wrapper.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors produced at the HTTP boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection dropped
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Missing or rejected credentials (401/403)
    #[error("Not signed in or not allowed")]
    Unauthorized,

    /// Resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
}

impl ApiError {
    /// Map a non-success HTTP status to an error.
    pub fn from_status(status: u16, path: &str, body: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound(path.to_string()),
            _ => Self::HttpError {
                status,
                message: body,
            },
        }
    }
}

/// Supplies the bearer token attached to outgoing requests.
pub trait AccessTokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait ApiPort: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError>;

    /// Like `get`, but a 404 yields `Ok(None)`.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError>;

    async fn post<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>;

    async fn put<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
