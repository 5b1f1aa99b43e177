//! Task repository: create, entry append/edit, status transitions, listing.

use chrono::Utc;

use jot_core::entities::{Entry, Task, entry_kind};
use jot_core::errors::CoreError;
use jot_core::requests::{
    AddEntryRequest, CreateTaskRequest, ListTasksRequest, UpdateEntryRequest,
    UpdateStatusRequest,
};
use jot_core::responses::{EntryResponse, StatusResponse, TaskPage};

use crate::error::StoreError;
use crate::filter;
use crate::service::JournalService;

/// What happened when an imported task was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// A new task file was created.
    pub created: bool,
    pub entries_added: usize,
    /// Entries whose (timestamp, content) already existed on the task.
    pub duplicates_skipped: usize,
}

impl JournalService {
    /// Create a task with its creation entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a task with the same ID exists.
    pub async fn create_task(&self, req: CreateTaskRequest) -> Result<Task, StoreError> {
        let _guard = self.lock_task(&req.id).await;
        if self.store().task_exists(&req.id).await? {
            return Err(CoreError::Validation(format!("task '{}' already exists", req.id)).into());
        }

        let mut task = Task::new(&req.id, &req.title, req.task_type, Utc::now());
        task.tags = req.tags;
        task.priority = req.priority;
        if let Some(url) = req.issue_url.as_deref() {
            task.set_issue_url(url);
        }
        self.store().save_task(&task).await?;
        self.record_daily(&task.id, &task.entries).await;

        tracing::info!(task_id = %task.id, task_type = %task.task_type, "created task");
        Ok(task)
    }

    /// Load one task by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown ID.
    pub async fn get_task(&self, task_id: &str) -> Result<Task, StoreError> {
        self.store().load_task(task_id).await
    }

    /// Append a `log` entry.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown task, or `StoreError` if the
    /// task cannot be read or written.
    pub async fn add_entry(&self, req: AddEntryRequest) -> Result<EntryResponse, StoreError> {
        let _guard = self.lock_task(&req.task_id).await;
        let mut task = self.store().load_task(&req.task_id).await?;

        let now = Utc::now();
        let entry = Entry::new(req.timestamp.unwrap_or(now), req.content, entry_kind::LOG);
        let entry = task.push_entry(entry, now).clone();
        self.store().save_task(&task).await?;
        self.record_daily(&task.id, std::slice::from_ref(&entry)).await;

        tracing::debug!(task_id = %task.id, entry_id = %entry.id, "added entry");
        Ok(EntryResponse {
            task_id: task.id,
            entry,
        })
    }

    /// Replace the content of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown task or entry ID.
    pub async fn update_entry(&self, req: UpdateEntryRequest) -> Result<EntryResponse, StoreError> {
        let _guard = self.lock_task(&req.task_id).await;
        let mut task = self.store().load_task(&req.task_id).await?;

        if !task.edit_entry(&req.entry_id, &req.content, Utc::now()) {
            return Err(CoreError::NotFound {
                entity_type: "entry".into(),
                id: req.entry_id,
            }
            .into());
        }
        self.store().save_task(&task).await?;

        let entry = task
            .entries
            .iter()
            .find(|e| e.id == req.entry_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("edited entry {} vanished", req.entry_id))?;
        self.refresh_daily_entry(&task.id, &entry).await;
        Ok(EntryResponse {
            task_id: task.id,
            entry,
        })
    }

    /// Change status and log the transition.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown task, or `StoreError` if the
    /// task cannot be read or written.
    pub async fn update_status(&self, req: UpdateStatusRequest) -> Result<StatusResponse, StoreError> {
        let _guard = self.lock_task(&req.task_id).await;
        let mut task = self.store().load_task(&req.task_id).await?;

        let previous = task.status;
        let entry = task.change_status(req.status, req.reason.as_deref(), Utc::now());
        self.store().save_task(&task).await?;
        self.record_daily(&task.id, std::slice::from_ref(&entry)).await;

        tracing::info!(task_id = %task.id, from = %previous, to = %req.status, "status changed");
        Ok(StatusResponse {
            task_id: task.id,
            previous,
            status: req.status,
            entry,
        })
    }

    /// Filter, sort, and page every readable task.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the tasks directory cannot be listed.
    pub async fn list_tasks(&self, req: &ListTasksRequest) -> Result<TaskPage, StoreError> {
        let report = self.load_tasks().await?;
        let (tasks, total) = filter::select(report.records, &req.filter, req.page);
        Ok(TaskPage {
            tasks,
            total,
            offset: req.page.offset,
            limit: req.page.limit,
            skipped_records: report.skipped,
        })
    }

    /// Write an imported task, merging into an existing task with the same ID.
    ///
    /// On merge, incoming entries matching an existing (timestamp, content)
    /// pair are skipped and the rest are appended. A new task with no
    /// entries gets a creation entry so the log is never empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the ID is not a usable file name or the task
    /// cannot be read or written.
    pub async fn merge_task(&self, mut incoming: Task) -> Result<MergeOutcome, StoreError> {
        let _guard = self.lock_task(&incoming.id).await;
        let now = Utc::now();

        if !self.store().task_exists(&incoming.id).await? {
            let entries_added = incoming.entries.len();
            if incoming.entries.is_empty() {
                let creation = Entry::new(
                    incoming.created,
                    format!("Task created: {}", incoming.title),
                    entry_kind::CREATION,
                );
                incoming.entries.push(creation);
            }
            self.store().save_task(&incoming).await?;
            self.record_daily(&incoming.id, &incoming.entries).await;
            return Ok(MergeOutcome {
                created: true,
                entries_added,
                duplicates_skipped: 0,
            });
        }

        let mut existing = self.store().load_task(&incoming.id).await?;
        let mut outcome = MergeOutcome::default();
        let mut added = Vec::new();
        for entry in incoming.entries {
            let duplicate = existing
                .entries
                .iter()
                .any(|e| e.timestamp == entry.timestamp && e.content == entry.content);
            if duplicate {
                outcome.duplicates_skipped += 1;
            } else {
                added.push(existing.push_entry(entry, now).clone());
            }
        }
        outcome.entries_added = added.len();
        if !added.is_empty() {
            self.store().save_task(&existing).await?;
            self.record_daily(&existing.id, &added).await;
        }
        Ok(outcome)
    }
}
