use chrono::{DateTime, Utc};
use jot_core::entities::{Entry, Task, entry_kind};
use jot_core::enums::{TaskStatus, TaskType, parse_choice};
use jot_core::ids::sanitize_segment;
use serde_json::{Map, Value};

use super::{BatchBuilder, ImportAdapter, ImportContext, ParsedBatch, fit_times};
use crate::error::ImportError;

/// JSON: the export document shape, or any other JSON as one raw entry.
pub struct JsonAdapter;

impl ImportAdapter for JsonAdapter {
    fn parse(&self, content: &str, ctx: &ImportContext) -> Result<ParsedBatch, ImportError> {
        let value: Value = serde_json::from_str(content).map_err(ImportError::InvalidJson)?;
        let mut builder = BatchBuilder::new(ctx);

        let Some(elements) = value.get("tasks").and_then(Value::as_array) else {
            let idx = builder.task_index("Imported JSON data", Some("json-data"));
            builder.push_entry(idx, ctx.now, content.trim());
            let (tasks, _) = builder.finish();
            return Ok(ParsedBatch {
                tasks,
                warnings: Vec::new(),
            });
        };

        let mut batch = ParsedBatch::default();
        for (n, element) in elements.iter().enumerate() {
            match element.as_object() {
                Some(obj) => match task_from_object(obj, &mut builder, &mut batch.warnings) {
                    Some(task) => batch.tasks.push(task),
                    None => batch
                        .warnings
                        .push(format!("Task {}: missing title, skipped", n + 1)),
                },
                None => batch
                    .warnings
                    .push(format!("Task {}: not an object, skipped", n + 1)),
            }
        }

        let meetings = value
            .get("one_on_ones")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if meetings > 0 {
            batch
                .warnings
                .push(format!("{meetings} one-on-one record(s) are not imported"));
        }
        Ok(batch)
    }
}

fn str_field<'v>(obj: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn rfc3339(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

/// Build a task from one element of `tasks`. `None` when the title is missing.
fn task_from_object(
    obj: &Map<String, Value>,
    builder: &mut BatchBuilder<'_>,
    warnings: &mut Vec<String>,
) -> Option<Task> {
    let ctx = builder.ctx;
    let title = str_field(obj, "title")?;

    let segment = str_field(obj, "id")
        .map(sanitize_segment)
        .filter(|s| !s.is_empty())
        .or_else(|| Some(sanitize_segment(title)).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "task".to_string());
    let id = builder.unique_id(&segment);

    let task_type = str_field(obj, "type")
        .and_then(|t| parse_choice::<TaskType>(t, "type").ok())
        .unwrap_or(ctx.default_type);
    let mut task = Task::without_entries(&id, title, task_type, ctx.now);
    task.status = str_field(obj, "status")
        .and_then(|s| parse_choice::<TaskStatus>(s, "status").ok())
        .unwrap_or(TaskStatus::Active);
    task.priority = str_field(obj, "priority").map(String::from);
    task.tags = obj
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    if let Some(url) = str_field(obj, "issue_url") {
        task.set_issue_url(url);
    }

    let entries = obj.get("entries").and_then(Value::as_array);
    for (n, raw) in entries.into_iter().flatten().enumerate() {
        let content = raw
            .as_object()
            .and_then(|e| e.get("content"))
            .and_then(Value::as_str)
            .filter(|c| !c.trim().is_empty());
        let Some(content) = content else {
            warnings.push(format!("Task '{title}' entry {}: missing content, skipped", n + 1));
            continue;
        };
        let timestamp = rfc3339(raw.get("timestamp").and_then(Value::as_str)).unwrap_or(ctx.now);
        task.entries
            .push(Entry::new(timestamp, content, entry_kind::IMPORTED));
    }

    fit_times(&mut task);
    if let Some(created) = rfc3339(str_field(obj, "created")) {
        task.created = created;
    }
    if let Some(updated) = rfc3339(str_field(obj, "updated")) {
        task.updated = updated;
    }
    Some(task)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::adapters::tests::ctx;

    #[test]
    fn export_shape() {
        let content = r#"{"tasks": [{"id": "test", "title": "Test Task", "type": "learning",
            "status": "completed", "tags": ["rust"], "priority": "high",
            "entries": [{"content": "Test entry", "timestamp": "2024-01-01T12:00:00Z"}]}]}"#;
        let batch = JsonAdapter.parse(content, &ctx()).unwrap();

        assert_eq!(batch.tasks.len(), 1);
        let task = &batch.tasks[0];
        assert_eq!(task.id, "IMP-test");
        assert_eq!(task.task_type, TaskType::Learning);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.tags, ["rust"]);
        assert_eq!(task.priority.as_deref(), Some("high"));
        assert_eq!(
            task.entries[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(task.entries[0].entry_type, entry_kind::IMPORTED);
    }

    #[test]
    fn invalid_type_and_status_fall_back() {
        let content = r#"{"tasks": [{"title": "T", "type": "chores", "status": "done"}]}"#;
        let ctx = ctx();
        let batch = JsonAdapter.parse(content, &ctx).unwrap();
        assert_eq!(batch.tasks[0].task_type, ctx.default_type);
        assert_eq!(batch.tasks[0].status, TaskStatus::Active);
        assert_eq!(batch.tasks[0].id, "IMP-t");
    }

    #[test]
    fn untitled_elements_are_skipped() {
        let content = r#"{"tasks": [{"id": "a"}, {"title": "Kept"}, 7]}"#;
        let batch = JsonAdapter.parse(content, &ctx()).unwrap();
        assert_eq!(batch.tasks.len(), 1);
        assert_eq!(
            batch.warnings,
            ["Task 1: missing title, skipped", "Task 3: not an object, skipped"]
        );
    }

    #[test]
    fn duplicate_ids_are_uniquified() {
        let content = r#"{"tasks": [{"id": "x", "title": "One"}, {"id": "x", "title": "Two"}]}"#;
        let batch = JsonAdapter.parse(content, &ctx()).unwrap();
        let ids: Vec<_> = batch.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["IMP-x", "IMP-x-2"]);
    }

    #[test]
    fn bad_entry_timestamp_uses_now() {
        let content = r#"{"tasks": [{"title": "T", "entries": [{"content": "c", "timestamp": "yesterday"}]}]}"#;
        let ctx = ctx();
        let batch = JsonAdapter.parse(content, &ctx).unwrap();
        assert_eq!(batch.tasks[0].entries[0].timestamp, ctx.now);
    }

    #[test]
    fn other_json_becomes_one_raw_entry() {
        let batch = JsonAdapter.parse(r#"  {"note": "hello"}  "#, &ctx()).unwrap();
        assert_eq!(batch.tasks.len(), 1);
        assert_eq!(batch.tasks[0].id, "IMP-json-data");
        assert_eq!(batch.tasks[0].entries[0].content, r#"{"note": "hello"}"#);
    }

    #[test]
    fn meetings_are_reported() {
        let content = r#"{"tasks": [], "one_on_ones": [{"date": "2025-01-01"}]}"#;
        let batch = JsonAdapter.parse(content, &ctx()).unwrap();
        assert_eq!(batch.warnings, ["1 one-on-one record(s) are not imported"]);
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = JsonAdapter.parse("{not json", &ctx()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
        assert!(err.to_string().starts_with("Invalid JSON:"));
    }
}
