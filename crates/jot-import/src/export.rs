//! Renderers for `ExportData`.
//!
//! The JSON document is the shape the JSON import adapter reads back, and
//! the CSV header is one the CSV adapter recognizes.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use jot_core::dates::{DATE_FORMAT, DateRange, start_of_day};
use jot_core::entities::{OneOnOne, Task};
use jot_core::enums::{ExportFormat, TaskType};
use jot_core::markdown::Markdown;
use serde::Serialize;

use crate::error::ImportError;

const CSV_HEADER: &str = "Type,Date,Time,Task_ID,Task_Title,Content,Entry_Type";

#[derive(Serialize)]
struct ExportDocument<'a> {
    tasks: &'a [Task],
    one_on_ones: &'a [OneOnOne],
    exported_at: String,
}

/// Apply the type filter and the entry date window.
///
/// With a bounded window, tasks keep only the entries inside it and tasks
/// left with none are dropped. Without one, tasks pass through whole.
#[must_use]
pub fn select_tasks(tasks: Vec<Task>, range: &DateRange, task_type: Option<TaskType>) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .into_iter()
        .filter(|t| task_type.is_none_or(|ty| t.task_type == ty))
        .filter_map(|mut task| {
            if range.is_unbounded() {
                return Some(task);
            }
            task.entries.retain(|e| range.contains(e.timestamp));
            (!task.entries.is_empty()).then_some(task)
        })
        .collect();
    selected.sort_by(|a, b| a.id.cmp(&b.id));
    selected
}

/// Meetings whose date falls inside the window, oldest first.
///
/// A meeting with an unparseable date is kept only when the window is open.
#[must_use]
pub fn select_meetings(meetings: Vec<OneOnOne>, range: &DateRange) -> Vec<OneOnOne> {
    let mut selected: Vec<OneOnOne> = meetings
        .into_iter()
        .filter(|m| match NaiveDate::parse_from_str(&m.date, DATE_FORMAT) {
            Ok(date) => range.contains(start_of_day(date)),
            Err(_) => range.is_unbounded(),
        })
        .collect();
    selected.sort_by(|a, b| a.date.cmp(&b.date));
    selected
}

/// Render the selected records.
///
/// # Errors
///
/// Returns [`ImportError::Export`] if JSON encoding fails.
pub fn render(
    format: ExportFormat,
    tasks: &[Task],
    meetings: &[OneOnOne],
    now: DateTime<Utc>,
) -> Result<String, ImportError> {
    match format {
        ExportFormat::Json => render_json(tasks, meetings, now),
        ExportFormat::Markdown => Ok(render_markdown(tasks, meetings, now)),
        ExportFormat::Csv => Ok(render_csv(tasks, meetings)),
    }
}

fn render_json(tasks: &[Task], meetings: &[OneOnOne], now: DateTime<Utc>) -> Result<String, ImportError> {
    let doc = ExportDocument {
        tasks,
        one_on_ones: meetings,
        exported_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    serde_json::to_string_pretty(&doc).map_err(ImportError::Export)
}

fn render_markdown(tasks: &[Task], meetings: &[OneOnOne], now: DateTime<Utc>) -> String {
    let mut out = String::from("# Journal Export\n\n");
    let _ = writeln!(out, "Exported on: {}\n", now.format("%Y-%m-%d %H:%M"));
    if !tasks.is_empty() {
        out.push_str("## Tasks\n\n");
        for task in tasks {
            out.push_str(&task.to_markdown());
            out.push_str("\n---\n\n");
        }
    }
    if !meetings.is_empty() {
        out.push_str("## One-on-One Meetings\n\n");
        for meeting in meetings {
            out.push_str(&meeting.to_markdown());
            out.push('\n');
        }
    }
    out
}

/// Quote a CSV field, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn render_csv(tasks: &[Task], meetings: &[OneOnOne]) -> String {
    let mut out = format!("{CSV_HEADER}\n");
    for task in tasks {
        for entry in &task.entries {
            let _ = writeln!(
                out,
                "task,{},{},{},{},{},{}",
                entry.timestamp.format(DATE_FORMAT),
                entry.timestamp.format("%H:%M"),
                quote(&task.id),
                quote(&task.title),
                quote(&entry.content),
                entry.entry_type
            );
        }
    }
    for meeting in meetings {
        let _ = writeln!(
            out,
            "one-on-one,{},00:00,one-on-one,\"One-on-One Meeting\",{},meeting",
            meeting.date,
            quote(&meeting_summary(meeting))
        );
    }
    out
}

fn meeting_summary(meeting: &OneOnOne) -> String {
    let mut parts = Vec::new();
    if !meeting.notes.is_empty() {
        parts.push(meeting.notes.clone());
    }
    for (label, items) in [
        ("Insights", &meeting.insights),
        ("Todos", &meeting.todos),
        ("Feedback", &meeting.feedback),
    ] {
        if !items.is_empty() {
            parts.push(format!("{label}: {}", items.join("; ")));
        }
    }
    parts.join(" | ")
}
