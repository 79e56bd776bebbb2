//! In-memory platform implementations for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::{future::Future, pin::Pin};

use crate::ports::outbound::{RandomProvider, SleepProvider, StorageProvider, TimeProvider};
use crate::state::Platform;

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTimeProvider {
    now_ms: AtomicU64,
}

impl ManualTimeProvider {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    pub fn now(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl TimeProvider for ManualTimeProvider {
    fn now_millis(&self) -> u64 {
        self.now()
    }
}

/// Sleeper that resolves immediately, optionally advancing a manual clock by
/// the requested duration.
#[derive(Debug, Default)]
pub struct InstantSleepProvider {
    clock: Option<Arc<ManualTimeProvider>>,
    slept_ms: AtomicU64,
}

impl InstantSleepProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advancing(clock: Arc<ManualTimeProvider>) -> Self {
        Self {
            clock: Some(clock),
            slept_ms: AtomicU64::new(0),
        }
    }

    pub fn total_slept_ms(&self) -> u64 {
        self.slept_ms.load(Ordering::SeqCst)
    }
}

impl SleepProvider for InstantSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        self.slept_ms.fetch_add(ms, Ordering::SeqCst);
        if let Some(clock) = &self.clock {
            clock.advance(ms);
        }
        Box::pin(std::future::ready(()))
    }
}

/// Always returns the same number, clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandomProvider(pub i32);

impl RandomProvider for FixedRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max.max(min))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorageProvider {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorageProvider {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

/// A platform with a frozen clock, instant sleeps, fixed randomness and
/// in-memory storage.
pub fn create_mock_platform() -> Platform {
    Platform::new(
        ManualTimeProvider::new(0),
        InstantSleepProvider::new(),
        FixedRandomProvider(16),
        MemoryStorageProvider::default(),
    )
}
