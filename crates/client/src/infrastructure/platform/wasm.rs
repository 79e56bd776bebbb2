//! Browser platform implementations
//!
//! Clock and randomness come from `js_sys`, timers from `gloo-timers`, and
//! storage from `window.localStorage`. Web handles are not `Send`, so every
//! call looks them up again instead of holding them.

use crate::ports::outbound::{RandomProvider, SleepProvider, StorageProvider, TimeProvider};
use crate::state::Platform;
use std::{future::Future, pin::Pin};

#[derive(Clone, Default)]
pub struct WasmTimeProvider;

impl TimeProvider for WasmTimeProvider {
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

#[derive(Clone, Default)]
pub struct WasmRandomProvider;

impl RandomProvider for WasmRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = f64::from(max - min + 1);
        min + (js_sys::Math::random() * span).floor() as i32
    }
}

#[derive(Clone, Default)]
pub struct WasmStorageProvider;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl StorageProvider for WasmStorageProvider {
    fn save(&self, key: &str, value: &str) {
        let Some(storage) = local_storage() else {
            tracing::warn!("localStorage unavailable; not saving {}", key);
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::error!("Failed to write localStorage key {}: {:?}", key, e);
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::error!("Failed to remove localStorage key {}: {:?}", key, e);
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct WasmSleepProvider;

impl SleepProvider for WasmSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        Box::pin(gloo_timers::future::TimeoutFuture::new(ms))
    }
}

/// Create platform services for the browser
pub fn create_platform() -> Platform {
    Platform::new(
        WasmTimeProvider,
        WasmSleepProvider,
        WasmRandomProvider,
        WasmStorageProvider,
    )
}
