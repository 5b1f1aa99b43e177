use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::new_entry_id;

/// Well-known values of [`Entry::entry_type`].
pub mod entry_kind {
    pub const CREATION: &str = "creation";
    pub const LOG: &str = "log";
    pub const STATUS_CHANGE: &str = "status_change";
    pub const IMPORTED: &str = "imported";
    pub const ONE_ON_ONE: &str = "one-on-one";
}

/// A single timestamped note inside a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub entry_type: String,
}

impl Entry {
    /// Create an entry with a freshly generated ID.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, content: impl Into<String>, entry_type: &str) -> Self {
        Self {
            id: new_entry_id(),
            timestamp,
            content: content.into(),
            entry_type: entry_type.to_string(),
        }
    }

    /// Whether this entry carries the given kind.
    #[must_use]
    pub fn is_kind(&self, kind: &str) -> bool {
        self.entry_type == kind
    }
}
