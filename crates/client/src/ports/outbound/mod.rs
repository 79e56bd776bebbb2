//! Traits the client needs from the outside world: the HTTP API, the
//! bearer token, and the platform providers.

pub mod api_port;
pub mod platform;
pub mod raw_api_port;

pub use api_port::{AccessTokenSource, ApiError, ApiPort};
pub use platform::{storage_keys, RandomProvider, SleepProvider, StorageProvider, TimeProvider};
pub use raw_api_port::RawApiPort;

#[cfg(any(test, feature = "testing"))]
pub use raw_api_port::MockRawApiPort;
