//! Markdown renderings of entities and responses.
//!
//! The CLI prints these when `--format markdown` is selected; the export
//! pipeline reuses the task and meeting renderers.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::dates::date_key;
use crate::entities::{Entry, OneOnOne, Task};
use crate::responses::{
    DailyLog, EntryResponse, ImportResult, OneOnOneHistory, SearchResults, StatusResponse,
    TaskPage, WeeklyLog,
};

const STAMP: &str = "%Y-%m-%d %H:%M";
const CLOCK: &str = "%H:%M";

/// Render a value as a markdown document.
pub trait Markdown {
    fn to_markdown(&self) -> String;
}

// `write!` into a `String` cannot fail; results are discarded throughout.

fn task_header(out: &mut String, task: &Task, level: &str) {
    let _ = writeln!(out, "{level} {}: {}", task.id, task.title);
    let _ = write!(out, "**Type:** {} | **Status:** {}", task.task_type, task.status);
    if let Some(priority) = &task.priority {
        let _ = write!(out, " | **Priority:** {priority}");
    }
    out.push('\n');
    if !task.tags.is_empty() {
        let _ = writeln!(out, "**Tags:** {}", task.tags.join(", "));
    }
    if let Some(url) = &task.issue_url {
        let label = task.issue_id.as_deref().unwrap_or(url);
        let _ = writeln!(out, "**Issue:** [{label}]({url})");
    }
}

fn timed_entries(out: &mut String, entries: &[Entry]) {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);
    for entry in sorted {
        let _ = writeln!(out, "### {}", entry.timestamp.format(CLOCK));
        let _ = writeln!(out, "{}\n", entry.content);
    }
}

impl Markdown for Task {
    /// Header block, then entries grouped by date ascending.
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        task_header(&mut out, self, "#");
        let _ = writeln!(
            out,
            "**Created:** {} | **Updated:** {}\n",
            self.created.format(STAMP),
            self.updated.format(STAMP)
        );

        let mut by_date: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
        for entry in &self.entries {
            by_date
                .entry(date_key(entry.timestamp))
                .or_default()
                .push(entry.clone());
        }
        for (date, entries) in &by_date {
            let _ = writeln!(out, "## {date}");
            timed_entries(&mut out, entries);
        }
        out
    }
}

impl Markdown for TaskPage {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        let first = if self.tasks.is_empty() { 0 } else { self.offset + 1 };
        let _ = writeln!(
            out,
            "# Task List (showing {first}-{} of {} total)\n",
            self.offset + self.tasks.len(),
            self.total
        );
        if self.tasks.is_empty() {
            out.push_str("No tasks found matching the criteria.\n");
        }
        for task in &self.tasks {
            task_header(&mut out, task, "##");
            let _ = writeln!(out, "**Updated:** {}\n", task.updated.format(STAMP));
        }
        if !self.skipped_records.is_empty() {
            let _ = writeln!(out, "_Skipped {} unreadable record(s)._", self.skipped_records.len());
        }
        out
    }
}

impl Markdown for EntryResponse {
    fn to_markdown(&self) -> String {
        format!(
            "Entry {} on task {} at {}\n",
            self.entry.id,
            self.task_id,
            self.entry.timestamp.format(CLOCK)
        )
    }
}

impl Markdown for StatusResponse {
    fn to_markdown(&self) -> String {
        format!(
            "Updated task {} status from {} to {}\n",
            self.task_id, self.previous, self.status
        )
    }
}

impl Markdown for SearchResults {
    fn to_markdown(&self) -> String {
        let mut out = format!("# Search Results for \"{}\"\n\n", self.query);
        if self.hits.is_empty() {
            out.push_str("No matching entries found.\n");
            return out;
        }
        let _ = writeln!(out, "Found {} matching entries:\n", self.total);
        for hit in &self.hits {
            let _ = writeln!(out, "## {}: {}", hit.task_id, hit.task_title);
            let _ = writeln!(
                out,
                "**Date:** {} | **Context:** {}\n",
                hit.entry.timestamp.format(STAMP),
                hit.context
            );
            let _ = writeln!(out, "{}\n\n---\n", hit.snippet);
        }
        out
    }
}

impl Markdown for ImportResult {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Import Result\n\n");
        let _ = writeln!(out, "{}\n", self.summary);
        let _ = writeln!(out, "- **Tasks created:** {}", self.tasks_created);
        let _ = writeln!(out, "- **Entries added:** {}", self.entries_added);
        let _ = writeln!(out, "- **Duplicates skipped:** {}", self.duplicates_skipped);
        if !self.warnings.is_empty() {
            out.push_str("\n## Warnings\n");
            for warning in &self.warnings {
                let _ = writeln!(out, "- {warning}");
            }
        }
        out
    }
}

impl Markdown for DailyLog {
    fn to_markdown(&self) -> String {
        let mut out = format!("# Daily Log: {}\n\n", self.date);
        if self.tasks.is_empty() {
            out.push_str("No activity recorded for this date.\n");
            return out;
        }
        for task in &self.tasks {
            match &task.title {
                Some(title) => {
                    let _ = writeln!(out, "## {}: {title}", task.task_id);
                }
                None => {
                    let _ = writeln!(out, "## {}", task.task_id);
                }
            }
            timed_entries(&mut out, &task.entries);
        }
        out
    }
}

impl Markdown for WeeklyLog {
    fn to_markdown(&self) -> String {
        let mut out = format!("# Weekly Log: {} to {}\n\n", self.week_start, self.week_end);
        for day in &self.days {
            let _ = writeln!(out, "## {} ({})", day.date, day.date.format("%A"));
            if day.tasks.is_empty() {
                out.push_str("_No activity_\n\n");
                continue;
            }
            for task in &day.tasks {
                match &task.title {
                    Some(title) => {
                        let _ = writeln!(out, "### {}: {title}", task.task_id);
                    }
                    None => {
                        let _ = writeln!(out, "### {}", task.task_id);
                    }
                }
                for entry in &task.entries {
                    let _ = writeln!(out, "- {}: {}", entry.timestamp.format(CLOCK), entry.content);
                }
                out.push('\n');
            }
        }
        out.push_str("## Weekly Summary\n");
        let _ = writeln!(out, "- **Total entries:** {}", self.total_entries);
        let _ = writeln!(out, "- **Tasks worked on:** {}", self.tasks_worked.len());
        if !self.tasks_worked.is_empty() {
            let _ = writeln!(out, "- **Tasks:** {}", self.tasks_worked.join(", "));
        }
        out
    }
}

impl Markdown for OneOnOne {
    fn to_markdown(&self) -> String {
        let mut out = format!("## {}\n", self.date);
        if !self.insights.is_empty() {
            out.push_str("**Insights:**\n");
            for insight in &self.insights {
                let _ = writeln!(out, "- {insight}");
            }
            out.push('\n');
        }
        if !self.todos.is_empty() {
            out.push_str("**Action Items:**\n");
            for todo in &self.todos {
                let _ = writeln!(out, "- [ ] {todo}");
            }
            out.push('\n');
        }
        if !self.feedback.is_empty() {
            out.push_str("**Feedback:**\n");
            for item in &self.feedback {
                let _ = writeln!(out, "- {item}");
            }
            out.push('\n');
        }
        if !self.notes.is_empty() {
            let _ = writeln!(out, "**Notes:**\n{}\n", self.notes);
        }
        out
    }
}

impl Markdown for OneOnOneHistory {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# One-on-One History\n\n");
        if self.meetings.is_empty() {
            out.push_str("No one-on-one meetings recorded yet.\n");
            return out;
        }
        for meeting in &self.meetings {
            out.push_str(&meeting.to_markdown());
            out.push_str("---\n\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::entry_kind;
    use crate::enums::TaskType;
    use crate::responses::DailyTaskActivity;

    #[test]
    fn task_groups_entries_by_date() {
        let day1 = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let mut task = Task::new("MDU-1", "Fix login", TaskType::Work, day1);
        task.priority = Some("high".into());
        task.push_entry(
            Entry::new(day1 + Duration::days(1), "Found the bug", entry_kind::LOG),
            day1 + Duration::days(1),
        );

        let md = task.to_markdown();
        assert!(md.starts_with("# MDU-1: Fix login\n**Type:** work | **Status:** active | **Priority:** high\n"));
        let first = md.find("## 2025-01-15").unwrap();
        let second = md.find("## 2025-01-16").unwrap();
        assert!(first < second);
        assert!(md.contains("### 09:00\nFound the bug\n"));
    }

    #[test]
    fn empty_daily_log() {
        let log = DailyLog {
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            tasks: vec![],
        };
        assert_eq!(
            log.to_markdown(),
            "# Daily Log: 2025-01-15\n\nNo activity recorded for this date.\n"
        );
    }

    #[test]
    fn daily_log_falls_back_to_id_without_title() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 14, 5, 0).unwrap();
        let log = DailyLog {
            date: ts.date_naive(),
            tasks: vec![DailyTaskActivity {
                task_id: "gone".into(),
                title: None,
                entries: vec![Entry::new(ts, "note", entry_kind::LOG)],
            }],
        };
        let md = log.to_markdown();
        assert!(md.contains("## gone\n### 14:05\nnote\n"));
    }

    #[test]
    fn one_on_one_sections() {
        let meeting = OneOnOne {
            date: "2025-01-15".into(),
            insights: vec!["ship smaller PRs".into()],
            todos: vec!["book design review".into()],
            feedback: vec![],
            notes: String::new(),
            created: Utc::now(),
        };
        let md = meeting.to_markdown();
        assert!(md.contains("**Insights:**\n- ship smaller PRs\n"));
        assert!(md.contains("**Action Items:**\n- [ ] book design review\n"));
        assert!(!md.contains("**Feedback:**"));
        assert!(!md.contains("**Notes:**"));
    }
}
