use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Entry;

/// Per-date rollup: task ID to the entries recorded for it that day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: String,
    #[serde(default)]
    pub tasks: BTreeMap<String, Vec<Entry>>,
}

impl DailyActivity {
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            tasks: BTreeMap::new(),
        }
    }

    /// Record an entry under a task.
    pub fn record(&mut self, task_id: &str, entry: Entry) {
        self.tasks.entry(task_id.to_string()).or_default().push(entry);
    }

    /// Total entries across all tasks.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
