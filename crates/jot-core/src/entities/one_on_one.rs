use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured meeting notes, one record per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OneOnOne {
    /// `YYYY-MM-DD`; also the storage key.
    pub date: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub todos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feedback: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub created: DateTime<Utc>,
}

impl OneOnOne {
    /// All searchable text, lowercased and space-joined.
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        parts.push(self.notes.clone());
        parts.push(self.insights.join(" "));
        parts.push(self.todos.join(" "));
        parts.push(self.feedback.join(" "));
        parts.join(" ").to_lowercase()
    }
}
