//! Desktop platform implementations
//!
//! Backed by the standard library, tokio timers, `rand`, and a JSON file
//! in the per-user config directory.

use crate::ports::outbound::{RandomProvider, SleepProvider, StorageProvider, TimeProvider};
use crate::state::Platform;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{future::Future, pin::Pin, sync::Arc};

#[derive(Clone, Default)]
pub struct DesktopTimeProvider;

impl TimeProvider for DesktopTimeProvider {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[derive(Clone, Default)]
pub struct DesktopRandomProvider;

impl RandomProvider for DesktopRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Key/value storage kept in memory and mirrored to `storage.json` in the
/// per-user config directory (`ProjectDirs` for `io.blockhaven.client`).
#[derive(Clone)]
pub struct DesktopStorageProvider {
    storage_path: PathBuf,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopStorageProvider {
    pub fn new() -> Self {
        let storage_path = ProjectDirs::from("io", "blockhaven", "client")
            .map(|dirs| dirs.config_dir().join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("blockhaven_storage.json"));
        Self::at_path(storage_path)
    }

    /// Storage rooted at an explicit file, loading whatever it already holds.
    pub fn at_path(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let cache = load_entries(&storage_path);
        tracing::debug!(path = %storage_path.display(), entries = cache.len(), "Desktop storage initialized");

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Mutate the entries, then write the whole file back.
    fn update(&self, change: impl FnOnce(&mut HashMap<String, String>)) {
        let snapshot = {
            let mut entries = match self.cache.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            change(&mut entries);
            serde_json::to_string_pretty(&*entries)
        };

        let written = snapshot
            .map_err(|e| e.to_string())
            .and_then(|data| write_entries(&self.storage_path, &data).map_err(|e| e.to_string()));
        if let Err(e) = written {
            tracing::error!(path = %self.storage_path.display(), "Failed to persist storage: {}", e);
        }
    }
}

fn load_entries(path: &Path) -> HashMap<String, String> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            tracing::warn!("Failed to read storage file: {}", e);
            return HashMap::new();
        }
    };
    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!("Discarding unreadable storage file: {}", e);
        HashMap::new()
    })
}

fn write_entries(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn load(&self, key: &str) -> Option<String> {
        let entries = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.update(|entries| {
            entries.remove(key);
        });
    }
}

#[derive(Clone, Default)]
pub struct DesktopSleepProvider;

impl SleepProvider for DesktopSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        })
    }
}

/// Create platform services for desktop
pub fn create_platform() -> Platform {
    Platform::new(
        DesktopTimeProvider,
        DesktopSleepProvider,
        DesktopRandomProvider,
        DesktopStorageProvider::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = DesktopStorageProvider::at_path(&path);
        storage.save("blockhaven_auth_session", "{\"user\":\"alex\"}");
        storage.save("other", "1");
        storage.remove("other");

        let reloaded = DesktopStorageProvider::at_path(&path);
        assert_eq!(
            reloaded.load("blockhaven_auth_session").as_deref(),
            Some("{\"user\":\"alex\"}")
        );
        assert_eq!(reloaded.load("other"), None);
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = DesktopStorageProvider::at_path(&path);
        assert_eq!(storage.load("anything"), None);
    }

    #[test]
    fn random_range_is_inclusive() {
        let random = DesktopRandomProvider;
        for _ in 0..100 {
            let n = random.random_range(1, 64);
            assert!((1..=64).contains(&n));
        }
        assert_eq!(random.random_range(5, 5), 5);
    }
}
