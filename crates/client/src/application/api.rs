//! Typed API wrapper for application services.
//!
//! `Api` wraps an `Arc<dyn RawApiPort>` and implements the typed `ApiPort`
//! interface via serde_json conversions, so services and UI never depend on
//! adapter types.

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::ports::outbound::{ApiError, ApiPort, RawApiPort};

#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn RawApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { raw }
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl ApiPort for Api {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.raw.get_json(path).await?;
        decode(value)
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        match self.raw.get_optional_json(path).await? {
            None => Ok(None),
            Some(value) => decode(value).map(Some),
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value = encode(body)?;
        let value = self.raw.post_json(path, &body_value).await?;
        decode(value)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value = encode(body)?;
        let value = self.raw.put_json(path, &body_value).await?;
        decode(value)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.raw.delete(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockRawApiPort;
    use mockall::predicate::*;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Motd {
        text: String,
    }

    #[tokio::test]
    async fn decodes_typed_response() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/motd"))
            .returning(|_| Ok(json!({"text": "hello"})));

        let api = Api::new(Arc::new(raw));
        let motd: Motd = api.get("/motd").await.unwrap();
        assert_eq!(motd.text, "hello");
    }

    #[tokio::test]
    async fn shape_mismatch_is_parse_error() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json().returning(|_| Ok(json!({"nope": 1})));

        let api = Api::new(Arc::new(raw));
        let result: Result<Motd, ApiError> = api.get("/motd").await;
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }

    #[tokio::test]
    async fn missing_optional_is_none() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_optional_json().returning(|_| Ok(None));

        let api = Api::new(Arc::new(raw));
        let result: Option<Motd> = api.get_optional("/motd").await.unwrap();
        assert!(result.is_none());
    }
}
