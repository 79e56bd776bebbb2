//! Clock, timer, randomness and key/value storage, implemented once for
//! desktop and once for the browser. `crate::state::Platform` bundles them.

use std::{future::Future, pin::Pin};

pub trait TimeProvider: Send + Sync {
    /// Unix time in milliseconds.
    fn now_millis(&self) -> u64;
}

/// Timer used between polling refetches.
pub trait SleepProvider: Send + Sync {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>>;
}

pub trait RandomProvider: Send + Sync {
    /// Uniform value in `min..=max`; `min` when the range is empty.
    fn random_range(&self, min: i32, max: i32) -> i32;
}

/// String key/value store that outlives the process. Write failures are
/// logged by the implementation, not returned.
pub trait StorageProvider: Send + Sync {
    fn save(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

pub mod storage_keys {
    pub const AUTH_SESSION: &str = "blockhaven_auth_session";
    pub const AUTH_PENDING_STATE: &str = "blockhaven_auth_pending_state";
}
