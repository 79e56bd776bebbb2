//! JSON-in, JSON-out transport that HTTP adapters implement.
//!
//! Everything here speaks `serde_json::Value` so the trait stays usable as
//! `Arc<dyn RawApiPort>`; typed decoding happens in `application::api::Api`.

use serde_json::Value;

use super::ApiError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    /// A 404 comes back as `Ok(None)`.
    async fn get_optional_json(&self, path: &str) -> Result<Option<Value>, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
