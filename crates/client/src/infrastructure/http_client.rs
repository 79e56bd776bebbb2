//! HTTP adapter for the remote API.
//!
//! Implements [`RawApiPort`] with `reqwest` on native targets and `gloo-net`
//! in the browser. Paths are appended to the configured base URL; when a
//! token source is attached, its token is sent as a bearer header.

use std::sync::Arc;

use serde_json::Value;

use crate::ports::outbound::{AccessTokenSource, ApiError, RawApiPort};

#[derive(Clone)]
pub struct ApiAdapter {
    base_url: String,
    tokens: Option<Arc<dyn AccessTokenSource>>,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::Client,
}

impl ApiAdapter {
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_ms;

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: None,
            #[cfg(not(target_arch = "wasm32"))]
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn with_token_source(mut self, tokens: Arc<dyn AccessTokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn bearer(&self) -> Option<String> {
        self.tokens.as_ref()?.access_token()
    }
}

fn parse_body(path: &str, body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(path, error = %e, "Response body is not JSON");
        ApiError::ParseError(e.to_string())
    })
}

// =============================================================================
// Native (reqwest)
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use reqwest::{Method, RequestBuilder, Response, StatusCode};

    impl ApiAdapter {
        fn request(&self, method: Method, path: &str) -> RequestBuilder {
            let request = self.client.request(method, self.url(path));
            match self.bearer() {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        }

        async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
            tracing::trace!(path, "Sending API request");
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                tracing::debug!(path, status = status.as_u16(), "API request failed");
                return Err(ApiError::from_status(status.as_u16(), path, body));
            }
            Ok(response)
        }

        async fn read_json(response: Response, path: &str) -> Result<Value, ApiError> {
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            parse_body(path, &body)
        }
    }

    #[async_trait::async_trait]
    impl RawApiPort for ApiAdapter {
        async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
            let response = self.send(self.request(Method::GET, path), path).await?;
            Self::read_json(response, path).await
        }

        async fn get_optional_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
            match self.send(self.request(Method::GET, path), path).await {
                Ok(response) => Self::read_json(response, path).await.map(Some),
                Err(ApiError::NotFound(_)) => Ok(None),
                Err(e) => Err(e),
            }
        }

        async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            let request = self.request(Method::POST, path).json(body);
            let response = self.send(request, path).await?;
            Self::read_json(response, path).await
        }

        async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            let request = self.request(Method::PUT, path).json(body);
            let response = self.send(request, path).await?;
            Self::read_json(response, path).await
        }

        async fn delete(&self, path: &str) -> Result<(), ApiError> {
            let response = self.send(self.request(Method::DELETE, path), path).await?;
            if response.status() != StatusCode::NO_CONTENT {
                tracing::trace!(path, status = response.status().as_u16(), "Delete answered");
            }
            Ok(())
        }
    }
}

// =============================================================================
// Browser (gloo-net)
// =============================================================================

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use gloo_net::http::{Request, RequestBuilder, Response};

    impl ApiAdapter {
        fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
            match self.bearer() {
                Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
                None => request,
            }
        }

        async fn check(response: Response, path: &str) -> Result<Response, ApiError> {
            if !response.ok() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ApiError::from_status(status, path, body));
            }
            Ok(response)
        }

        async fn read_json(response: Response, path: &str) -> Result<Value, ApiError> {
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            parse_body(path, &body)
        }

        async fn send_with_body(
            &self,
            request: RequestBuilder,
            path: &str,
            body: &Value,
        ) -> Result<Value, ApiError> {
            let request = self
                .authorize(request)
                .json(body)
                .map_err(|e| ApiError::SerializeError(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            let response = Self::check(response, path).await?;
            Self::read_json(response, path).await
        }

        async fn fetch(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
            let response = self
                .authorize(request)
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            Self::check(response, path).await
        }
    }

    #[async_trait::async_trait(?Send)]
    impl RawApiPort for ApiAdapter {
        async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
            let response = self.fetch(Request::get(&self.url(path)), path).await?;
            Self::read_json(response, path).await
        }

        async fn get_optional_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
            match self.fetch(Request::get(&self.url(path)), path).await {
                Ok(response) => Self::read_json(response, path).await.map(Some),
                Err(ApiError::NotFound(_)) => Ok(None),
                Err(e) => Err(e),
            }
        }

        async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            self.send_with_body(Request::post(&self.url(path)), path, body)
                .await
        }

        async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            self.send_with_body(Request::put(&self.url(path)), path, body)
                .await
        }

        async fn delete(&self, path: &str) -> Result<(), ApiError> {
            self.fetch(Request::delete(&self.url(path)), path).await?;
            Ok(())
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    struct FixedToken;

    impl AccessTokenSource for FixedToken {
        fn access_token(&self) -> Option<String> {
            Some("tok".to_string())
        }
    }

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !String::from_utf8_lossy(&request).contains("\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}/api/", addr), handle)
    }

    #[test]
    fn joins_paths_onto_base() {
        let adapter = ApiAdapter::new("http://localhost:8080/api/", 1000);
        assert_eq!(adapter.url("/quests/q1"), "http://localhost:8080/api/quests/q1");
        assert_eq!(adapter.url("server/status"), "http://localhost:8080/api/server/status");
    }

    #[tokio::test]
    async fn get_sends_bearer_and_parses_json() {
        let (base, server) = serve_once("200 OK", r#"{"online":true}"#).await;
        let adapter = ApiAdapter::new(&base, 5_000).with_token_source(Arc::new(FixedToken));

        let value = adapter.get_json("/server/status").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(value["online"], true);
        assert!(request.starts_with("GET /api/server/status"));
        assert!(request.to_lowercase().contains("authorization: bearer tok"));
    }

    #[tokio::test]
    async fn missing_resource_is_none() {
        let (base, server) = serve_once("404 Not Found", "").await;
        let adapter = ApiAdapter::new(&base, 5_000);

        let value = adapter.get_optional_json("/quests/q9").await.unwrap();
        server.await.unwrap();

        assert!(value.is_none());
    }

    #[tokio::test]
    async fn unauthorized_status_maps_to_error() {
        let (base, server) = serve_once("401 Unauthorized", "").await;
        let adapter = ApiAdapter::new(&base, 5_000);

        let err = adapter.get_json("/quests").await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err, ApiError::Unauthorized);
    }
}
