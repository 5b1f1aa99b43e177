//! # jot-store
//!
//! File-backed storage and the task/entry/log/meeting operations for Jot.
//!
//! Every record is one pretty-printed JSON file under the data root (see
//! [`layout`]). [`JournalStore`] is raw record I/O; [`service::JournalService`]
//! layers validation, per-task locking, and daily rollups on top. Nothing is
//! cached: every call re-reads the files it needs.

pub mod error;
pub mod filter;
pub mod layout;
mod locks;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use jot_core::entities::{DailyActivity, OneOnOne, Task};
use jot_core::errors::CoreError;
use jot_core::ids::is_valid_task_id;
use jot_core::responses::SkippedRecord;
use serde::Serialize;
use serde::de::DeserializeOwned;

use error::StoreError;
use layout::Layout;

/// Records that loaded, plus the files that did not.
#[derive(Debug, Clone)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Handle on one data root.
#[derive(Debug, Clone)]
pub struct JournalStore {
    layout: Layout,
}

impl JournalStore {
    /// Open a store rooted at `root`, creating the layout when `create_dirs` is set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if a directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>, create_dirs: bool) -> Result<Self, StoreError> {
        let store = Self {
            layout: Layout::new(root.into()),
        };
        if create_dirs {
            for dir in store.layout.dirs() {
                tokio::fs::create_dir_all(&dir)
                    .await
                    .map_err(|source| store.io_error(&dir, source))?;
            }
        }
        tracing::debug!(root = %store.layout.root().display(), "opened journal store");
        Ok(store)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            file: self.layout.relative(path),
            source,
        }
    }

    fn json_error(&self, path: &Path, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            file: self.layout.relative(path),
            source,
        }
    }

    // -----------------------------------------------------------------------
    // Generic record I/O
    // -----------------------------------------------------------------------

    /// Read and decode one record. `Ok(None)` when the file does not exist.
    async fn read_record<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, StoreError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(path, e)),
        };
        let value = serde_json::from_slice(&bytes).map_err(|e| self.json_error(path, e))?;
        tracing::debug!(file = %self.layout.relative(path), "read record");
        Ok(Some(value))
    }

    /// Encode and write one record, replacing any previous content.
    ///
    /// Writes a sibling temp file and renames it over the target, so readers
    /// never observe a half-written record.
    async fn write_record<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| self.json_error(path, e))?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(parent, e))?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| self.io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| self.io_error(path, e))?;
        tracing::debug!(file = %self.layout.relative(path), bytes = bytes.len(), "wrote record");
        Ok(())
    }

    /// Load every record in `dir`, skipping (and reporting) unreadable files.
    ///
    /// A missing directory yields an empty report. Files are visited in
    /// name order.
    async fn read_dir_records<T: DeserializeOwned>(
        &self,
        dir: &Path,
    ) -> Result<LoadReport<T>, StoreError> {
        let mut report = LoadReport::default();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(report),
            Err(e) => return Err(self.io_error(dir, e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.io_error(dir, e))?
        {
            let path = entry.path();
            if Layout::is_record(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            match self.read_record::<T>(&path).await {
                Ok(Some(record)) => report.records.push(record),
                // Removed between listing and reading.
                Ok(None) => {}
                Err(error) => {
                    let file = self.layout.relative(&path);
                    tracing::warn!(%file, %error, "skipping unreadable record");
                    report.skipped.push(SkippedRecord {
                        file,
                        reason: error.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Resolve the record path for a task ID, refusing IDs that would leave `tasks/`.
    fn task_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_task_id(id) {
            return Err(CoreError::Validation(format!(
                "task ID '{id}' cannot contain path separators or control characters"
            ))
            .into());
        }
        Ok(self.layout.task_path(id))
    }

    /// Write a task, overwriting any record with the same ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the ID is not a usable file name or the
    /// record cannot be written.
    pub async fn save_task(&self, task: &Task) -> Result<(), StoreError> {
        self.write_record(&self.task_path(&task.id)?, task).await
    }

    /// Load one task.
    ///
    /// # Errors
    ///
    /// Returns a not-found `StoreError` when no file exists for `id`, a
    /// validation error for an ID that is not a usable file name, and an
    /// error when the file holds a task with a different ID.
    pub async fn load_task(&self, id: &str) -> Result<Task, StoreError> {
        let path = self.task_path(id)?;
        let task: Task = self
            .read_record(&path)
            .await?
            .ok_or_else(|| StoreError::from(CoreError::task_not_found(id)))?;
        if task.id != id {
            return Err(StoreError::Other(anyhow::anyhow!(
                "{} holds task '{}', not '{id}'",
                self.layout.relative(&path),
                task.id
            )));
        }
        Ok(task)
    }

    /// Whether a record file exists for `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for an unusable ID or when the file system
    /// cannot be queried.
    pub async fn task_exists(&self, id: &str) -> Result<bool, StoreError> {
        let path = self.task_path(id)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| self.io_error(&path, e))
    }

    /// Load every readable task.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the tasks directory cannot be listed.
    /// Unreadable files are reported in the result instead.
    pub async fn load_all_tasks(&self) -> Result<LoadReport<Task>, StoreError> {
        self.read_dir_records(&self.layout.tasks_dir()).await
    }

    // -----------------------------------------------------------------------
    // Daily rollups
    // -----------------------------------------------------------------------

    /// Write the rollup for `daily.date`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record cannot be written.
    pub async fn save_daily(&self, daily: &DailyActivity) -> Result<(), StoreError> {
        self.write_record(&self.layout.daily_path(&daily.date), daily)
            .await
    }

    /// Load the rollup for `date`, `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or decoded.
    pub async fn load_daily(&self, date: &str) -> Result<Option<DailyActivity>, StoreError> {
        self.read_record(&self.layout.daily_path(date)).await
    }

    // -----------------------------------------------------------------------
    // One-on-ones
    // -----------------------------------------------------------------------

    /// Write a meeting record, replacing any earlier one for the same date.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record cannot be written.
    pub async fn save_one_on_one(&self, meeting: &OneOnOne) -> Result<(), StoreError> {
        self.write_record(&self.layout.one_on_one_path(&meeting.date), meeting)
            .await
    }

    /// Load the meeting for `date`, `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or decoded.
    pub async fn load_one_on_one(&self, date: &str) -> Result<Option<OneOnOne>, StoreError> {
        self.read_record(&self.layout.one_on_one_path(date)).await
    }

    /// Load every readable meeting record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the meetings directory cannot be listed.
    pub async fn load_all_one_on_ones(&self) -> Result<LoadReport<OneOnOne>, StoreError> {
        self.read_dir_records(&self.layout.one_on_ones_dir()).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jot_core::enums::TaskType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    async fn test_store() -> (TempDir, JournalStore) {
        let dir = TempDir::new().unwrap();
        let store = JournalStore::open(dir.path(), true).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn open_creates_layout() {
        let (dir, _store) = test_store().await;
        for name in ["tasks", "daily", "one-on-ones"] {
            assert!(dir.path().join(name).is_dir(), "{name} missing");
        }
    }

    #[tokio::test]
    async fn task_save_load_roundtrip() {
        let (_dir, store) = test_store().await;
        let task = Task::new("MDU-1", "Fix login", TaskType::Work, Utc::now());
        store.save_task(&task).await.unwrap();
        assert!(store.task_exists("MDU-1").await.unwrap());
        assert_eq!(store.load_task("MDU-1").await.unwrap(), task);
    }

    #[tokio::test]
    async fn missing_task_is_not_found() {
        let (_dir, store) = test_store().await;
        let err = store.load_task("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "task not found: nope");
    }

    #[tokio::test]
    async fn path_like_ids_never_reach_the_file_system() {
        let (dir, store) = test_store().await;
        std::fs::write(dir.path().join("outside.json"), "{}").unwrap();

        let err = store.load_task("../outside").await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert!(store.task_exists("../outside").await.is_err());

        let task = Task::new("../escape", "Escape", TaskType::Work, Utc::now());
        assert!(store.save_task(&task).await.is_err());
        assert!(!dir.path().join("escape.json").exists());
    }

    #[tokio::test]
    async fn record_holding_another_id_is_rejected() {
        let (dir, store) = test_store().await;
        let task = Task::new("b", "Bee", TaskType::Work, Utc::now());
        store.save_task(&task).await.unwrap();
        std::fs::copy(dir.path().join("tasks/b.json"), dir.path().join("tasks/a.json")).unwrap();

        let err = store.load_task("a").await.unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "tasks/a.json holds task 'b', not 'a'");
    }

    #[tokio::test]
    async fn corrupt_files_are_skipped_and_reported() {
        let (dir, store) = test_store().await;
        let task = Task::new("good", "Good", TaskType::Personal, Utc::now());
        store.save_task(&task).await.unwrap();
        std::fs::write(dir.path().join("tasks/broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("tasks/notes.txt"), "ignored").unwrap();

        let report = store.load_all_tasks().await.unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file, "tasks/broken.json");
        assert!(report.skipped[0].reason.starts_with("Invalid JSON in tasks/broken.json"));
        assert!(!report.skipped[0].reason.contains(&dir.path().display().to_string()));
    }

    #[tokio::test]
    async fn missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JournalStore::open(dir.path().join("fresh"), false).await.unwrap();
        let report = store.load_all_tasks().await.unwrap();
        assert!(report.records.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn daily_and_meeting_files() {
        let (_dir, store) = test_store().await;
        assert_eq!(store.load_daily("2025-01-15").await.unwrap(), None);

        let daily = DailyActivity::new("2025-01-15");
        store.save_daily(&daily).await.unwrap();
        assert_eq!(store.load_daily("2025-01-15").await.unwrap(), Some(daily));

        let meeting = OneOnOne {
            date: "2025-01-15".into(),
            insights: vec![],
            todos: vec!["follow up".into()],
            feedback: vec![],
            notes: String::new(),
            created: Utc::now(),
        };
        store.save_one_on_one(&meeting).await.unwrap();
        let all = store.load_all_one_on_ones().await.unwrap();
        assert_eq!(all.records, vec![meeting]);
    }
}
