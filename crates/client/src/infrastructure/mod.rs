//! Adapters behind the outbound ports: HTTP, platform services, configuration.

pub mod config;
pub mod http_client;
pub mod platform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::ClientConfig;
pub use http_client::ApiAdapter;
