//! The bundle of platform providers shared through Dioxus context.
//!
//! `main` builds one with `create_platform()`; components read it back with
//! `use_platform()`.

use std::sync::Arc;

use crate::ports::outbound::{RandomProvider, SleepProvider, StorageProvider, TimeProvider};

#[derive(Clone)]
pub struct Platform {
    time: Arc<dyn TimeProvider>,
    sleep: Arc<dyn SleepProvider>,
    random: Arc<dyn RandomProvider>,
    storage: Arc<dyn StorageProvider>,
}

impl Platform {
    pub fn new(
        time: impl TimeProvider + 'static,
        sleep: impl SleepProvider + 'static,
        random: impl RandomProvider + 'static,
        storage: impl StorageProvider + 'static,
    ) -> Self {
        Self {
            time: Arc::new(time),
            sleep: Arc::new(sleep),
            random: Arc::new(random),
            storage: Arc::new(storage),
        }
    }

    pub fn time(&self) -> Arc<dyn TimeProvider> {
        self.time.clone()
    }

    pub fn sleep(&self) -> Arc<dyn SleepProvider> {
        self.sleep.clone()
    }

    pub fn random(&self) -> Arc<dyn RandomProvider> {
        self.random.clone()
    }

    pub fn storage(&self) -> Arc<dyn StorageProvider> {
        self.storage.clone()
    }
}
