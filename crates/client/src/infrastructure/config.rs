//! Client configuration read from the environment.
//!
//! Native builds load a `.env` file first (via `dotenvy`) and then read
//! `BLOCKHAVEN_*` variables. Browser builds have no environment and use the
//! compiled defaults.

use crate::application::auth::AuthConfig;
use crate::application::DEFAULT_REQUEST_TIMEOUT_MS;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_MAP_URL: &str = "http://localhost:8100";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every API path is appended to
    pub api_url: String,
    pub request_timeout_ms: u64,
    /// Tile server of the map viewer
    pub map_url: String,
    pub auth: AuthConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            map_url: DEFAULT_MAP_URL.to_string(),
            auth: AuthConfig::default(),
        }
    }
}

impl ClientConfig {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Build from any variable source; unset or blank variables keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout_ms = match var("BLOCKHAVEN_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    "Invalid BLOCKHAVEN_REQUEST_TIMEOUT_MS, using {}",
                    DEFAULT_REQUEST_TIMEOUT_MS
                );
                DEFAULT_REQUEST_TIMEOUT_MS
            }),
            None => defaults.request_timeout_ms,
        };

        Self {
            api_url: var("BLOCKHAVEN_API_URL").unwrap_or(defaults.api_url),
            request_timeout_ms,
            map_url: var("BLOCKHAVEN_MAP_URL").unwrap_or(defaults.map_url),
            auth: AuthConfig {
                authorize_url: var("BLOCKHAVEN_AUTH_AUTHORIZE_URL"),
                client_id: var("BLOCKHAVEN_AUTH_CLIENT_ID"),
                redirect_uri: var("BLOCKHAVEN_AUTH_REDIRECT_URI"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BLOCKHAVEN_API_URL", "https://mc.example.com/api"),
            ("BLOCKHAVEN_REQUEST_TIMEOUT_MS", "5000"),
            ("BLOCKHAVEN_AUTH_CLIENT_ID", "site"),
            ("BLOCKHAVEN_MAP_URL", "  "),
        ]));

        assert_eq!(config.api_url, "https://mc.example.com/api");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.auth.client_id.as_deref(), Some("site"));
        assert_eq!(config.map_url, DEFAULT_MAP_URL);
    }

    #[test]
    fn bad_timeout_falls_back() {
        let config =
            ClientConfig::from_lookup(lookup(&[("BLOCKHAVEN_REQUEST_TIMEOUT_MS", "soon")]));
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }
}
