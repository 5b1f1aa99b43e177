//! Shared test utilities for jot-store tests.

use jot_core::requests::RequestDefaults;
use tempfile::TempDir;

use crate::JournalStore;
use crate::service::JournalService;

/// A service over a fresh temp data root. Keep the `TempDir` alive.
pub async fn test_service() -> (TempDir, JournalService) {
    let dir = TempDir::new().unwrap();
    let store = JournalStore::open(dir.path(), true).await.unwrap();
    (dir, JournalService::new(store, RequestDefaults::default()))
}
