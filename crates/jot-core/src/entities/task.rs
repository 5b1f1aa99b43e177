use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Entry, entry_kind};
use crate::enums::{TaskStatus, TaskType};
use crate::ids::issue_id_from_url;

/// A unit of work with a lifecycle status and an append-only entry log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Task {
    /// Create an active task with its synthesized creation entry.
    #[must_use]
    pub fn new(id: &str, title: &str, task_type: TaskType, now: DateTime<Utc>) -> Self {
        let mut task = Self::without_entries(id, title, task_type, now);
        task.entries.push(Entry::new(
            now,
            format!("Task created: {title}"),
            entry_kind::CREATION,
        ));
        task
    }

    /// Create an active task with an empty log.
    ///
    /// Callers must push at least one entry before persisting; the import
    /// pipeline uses this to build tasks whose log is the imported content.
    #[must_use]
    pub fn without_entries(id: &str, title: &str, task_type: TaskType, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            task_type,
            tags: Vec::new(),
            status: TaskStatus::Active,
            priority: None,
            issue_url: None,
            issue_id: None,
            created: now,
            updated: now,
            entries: Vec::new(),
        }
    }

    /// Attach an issue URL, deriving the issue ID where the tracker is known.
    pub fn set_issue_url(&mut self, url: &str) {
        self.issue_id = issue_id_from_url(url);
        self.issue_url = Some(url.to_string());
    }

    /// Append an entry and bump `updated`.
    pub fn push_entry(&mut self, entry: Entry, now: DateTime<Utc>) -> &Entry {
        self.entries.push(entry);
        self.updated = now;
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    /// Change status, logging the transition as a `status_change` entry.
    ///
    /// Returns a copy of the synthesized entry.
    pub fn change_status(
        &mut self,
        status: TaskStatus,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Entry {
        let mut content = format!("Status changed from {} to {}", self.status, status);
        if let Some(reason) = reason.filter(|r| !r.is_empty()) {
            content.push_str(": ");
            content.push_str(reason);
        }
        self.status = status;
        let entry = Entry::new(now, content, entry_kind::STATUS_CHANGE);
        self.push_entry(entry, now).clone()
    }

    /// Replace the content of one entry. Returns `false` when no entry has `entry_id`.
    pub fn edit_entry(&mut self, entry_id: &str, content: &str, now: DateTime<Utc>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == entry_id) else {
            return false;
        };
        entry.content = content.to_string();
        self.updated = now;
        true
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TaskStatus::Active
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Days between creation and last update, for completed tasks only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_days(&self) -> Option<f64> {
        (self.status == TaskStatus::Completed)
            .then(|| (self.updated - self.created).num_seconds() as f64 / 86_400.0)
    }

    /// Whole days since the last update.
    #[must_use]
    pub fn days_since_update(&self, now: DateTime<Utc>) -> i64 {
        (now - self.updated).num_days()
    }

    /// Whole days since creation.
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created).num_days()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_task_has_creation_entry() {
        let task = Task::new("MDU-1450", "Fix login", TaskType::Work, fixed_now());
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.entries.len(), 1);
        assert_eq!(task.entries[0].entry_type, entry_kind::CREATION);
        assert_eq!(task.entries[0].content, "Task created: Fix login");
    }

    #[test]
    fn change_status_logs_reason() {
        let mut task = Task::new("t", "T", TaskType::Work, fixed_now());
        let later = fixed_now() + Duration::hours(2);
        let entry = task.change_status(TaskStatus::Blocked, Some("waiting on review"), later);
        assert_eq!(
            entry.content,
            "Status changed from active to blocked: waiting on review"
        );
        assert_eq!(task.updated, later);
        assert_eq!(task.entries.len(), 2);
    }

    #[test]
    fn edit_entry_unknown_id() {
        let mut task = Task::new("t", "T", TaskType::Work, fixed_now());
        assert!(!task.edit_entry("entry_nope", "x", fixed_now()));
        let id = task.entries[0].id.clone();
        assert!(task.edit_entry(&id, "rewritten", fixed_now()));
        assert_eq!(task.entries[0].content, "rewritten");
    }

    #[test]
    fn completion_days_only_for_completed() {
        let mut task = Task::new("t", "T", TaskType::Work, fixed_now());
        assert_eq!(task.completion_days(), None);
        task.change_status(TaskStatus::Completed, None, fixed_now() + Duration::days(3));
        assert_eq!(task.completion_days(), Some(3.0));
    }

    #[test]
    fn issue_url_derives_id() {
        let mut task = Task::new("t", "T", TaskType::Work, fixed_now());
        task.set_issue_url("https://github.com/acme/api/issues/77");
        assert_eq!(task.issue_id.as_deref(), Some("77"));
    }

    #[test]
    fn serializes_type_field_name() {
        let task = Task::new("t", "T", TaskType::Learning, fixed_now());
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "learning");
        assert!(value.get("priority").is_none());
    }
}
