//! Service layer orchestrating journal mutations.
//!
//! `JournalService` wraps a [`JournalStore`] (raw record I/O) with the
//! request defaults from configuration and per-record locks. All operation
//! methods are implemented as `impl JournalService` in [`crate::repos`].

use jot_config::JotConfig;
use jot_core::entities::Task;
use jot_core::requests::RequestDefaults;
use tokio::sync::OwnedMutexGuard;

use crate::error::StoreError;
use crate::locks::KeyedLocks;
use crate::{JournalStore, LoadReport};

/// Orchestrates reads and read-modify-write mutations over the store.
///
/// Every mutation method follows this protocol:
/// 1. Take the record's lock
/// 2. Load the record
/// 3. Apply the change in memory
/// 4. Write the record back
/// 5. Record the change in the daily rollup (best effort)
pub struct JournalService {
    store: JournalStore,
    defaults: RequestDefaults,
    locks: KeyedLocks,
}

impl JournalService {
    #[must_use]
    pub fn new(store: JournalStore, defaults: RequestDefaults) -> Self {
        Self {
            store,
            defaults,
            locks: KeyedLocks::default(),
        }
    }

    /// Open the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the configuration is invalid or the data
    /// directories cannot be created.
    pub async fn open(config: &JotConfig) -> Result<Self, StoreError> {
        let defaults = config
            .general
            .request_defaults()
            .map_err(|e| StoreError::Other(e.into()))?;
        let store = JournalStore::open(&config.store.data_dir, config.store.create_dirs).await?;
        Ok(Self::new(store, defaults))
    }

    /// Access the underlying store.
    #[must_use]
    pub const fn store(&self) -> &JournalStore {
        &self.store
    }

    /// Defaults applied when validating arguments.
    #[must_use]
    pub const fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Load every readable task.
    pub async fn load_tasks(&self) -> Result<LoadReport<Task>, StoreError> {
        self.store.load_all_tasks().await
    }

    pub(crate) async fn lock_task(&self, id: &str) -> OwnedMutexGuard<()> {
        self.locks.lock(&format!("task:{id}")).await
    }

    pub(crate) async fn lock_daily(&self, date: &str) -> OwnedMutexGuard<()> {
        self.locks.lock(&format!("daily:{date}")).await
    }
}
