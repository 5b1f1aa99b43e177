//! Response types returned by Jot operations.
//!
//! These structs define the JSON shape of operation results. Each one also
//! has a markdown rendering in [`crate::markdown`].

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Entry, OneOnOne, Task};
use crate::enums::{ExportFormat, SearchContext, TaskStatus};

/// A record file that `load_all` could not read or decode.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Path relative to the data root, e.g. `tasks/broken.json`.
    pub file: String,
    pub reason: String,
}

/// Response from `ListTasks`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    /// Count after filtering, before slicing.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_records: Vec<SkippedRecord>,
}

/// Response from `AddTaskEntry` and `UpdateTaskEntry`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryResponse {
    pub task_id: String,
    pub entry: Entry,
}

/// Response from `UpdateTaskStatus`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusResponse {
    pub task_id: String,
    pub previous: TaskStatus,
    pub status: TaskStatus,
    pub entry: Entry,
}

/// A single search match.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchHit {
    pub task_id: String,
    pub task_title: String,
    pub entry: Entry,
    pub context: SearchContext,
    /// Display excerpt of the entry content.
    pub snippet: String,
}

/// Response from `SearchEntries`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_records: Vec<SkippedRecord>,
}

/// Response from `ImportData`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportResult {
    pub tasks_created: usize,
    pub entries_added: usize,
    pub duplicates_skipped: usize,
    pub warnings: Vec<String>,
    pub summary: String,
}

/// One task's activity on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DailyTaskActivity {
    pub task_id: String,
    /// `None` when the task file no longer loads.
    pub title: Option<String>,
    pub entries: Vec<Entry>,
}

/// Response from `GetDailyLog`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DailyLog {
    pub date: NaiveDate,
    /// Sorted by task ID; entries sorted by time.
    pub tasks: Vec<DailyTaskActivity>,
}

impl DailyLog {
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.tasks.iter().map(|t| t.entries.len()).sum()
    }
}

/// Response from `GetWeeklyLog`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WeeklyLog {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DailyLog>,
    pub total_entries: usize,
    /// Distinct task IDs with activity, sorted.
    pub tasks_worked: Vec<String>,
}

/// Response from `GetOneOnOneHistory`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OneOnOneHistory {
    pub meetings: Vec<OneOnOne>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_records: Vec<SkippedRecord>,
}

/// Response from `ExportData`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportOutput {
    pub format: ExportFormat,
    pub tasks: usize,
    pub entries: usize,
    pub one_on_ones: usize,
    pub exported_at: DateTime<Utc>,
    /// The rendered document.
    pub content: String,
}
