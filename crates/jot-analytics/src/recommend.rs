//! Rule-based task recommendations.
//!
//! Each focus area runs its own heuristics in a fixed order; results are
//! truncated to the requested limit without deduplication across rules.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use jot_core::entities::Task;
use jot_core::enums::{FocusArea, TaskStatus, TaskType};
use jot_core::markdown::Markdown;
use jot_core::requests::RecommendationsRequest;
use jot_core::responses::SkippedRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::insights::STALE_DAYS;

const BREAKDOWN_ENTRIES: usize = 10;
const REPEAT_ACTIVE: usize = 3;
const LEARNING_REVIEW_DAYS: i64 = 30;
const PRACTICE_ENTRIES: usize = 5;
const NEAR_DONE_ENTRIES: usize = 3;
const NEAR_DONE_DAYS: i64 = 3;
const REPRIORITIZE_AGE_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub rationale: String,
    pub priority: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalysisMetrics {
    pub focus_area: FocusArea,
    pub tasks_analyzed: usize,
    pub by_status: BTreeMap<String, usize>,
}

/// Response from `GetTaskRecommendations`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
    pub analysis_metrics: AnalysisMetrics,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_records: Vec<SkippedRecord>,
}

fn rec(
    kind: &str,
    title: String,
    description: String,
    rationale: String,
    priority: &str,
    confidence: f64,
    suggested_tags: Vec<String>,
) -> Recommendation {
    Recommendation {
        kind: kind.to_string(),
        title,
        description,
        rationale,
        priority: priority.to_string(),
        confidence,
        suggested_tags,
    }
}

fn productivity(tasks: &[&Task], now: DateTime<Utc>) -> Vec<Recommendation> {
    let mut out = Vec::new();
    for task in tasks.iter().filter(|t| t.is_active()) {
        if task.entries.len() > BREAKDOWN_ENTRIES {
            out.push(rec(
                "breakdown",
                format!("Break down '{}'", task.title),
                format!("Split {} into smaller, independently completable tasks.", task.id),
                format!("{} entries logged while the task is still active.", task.entries.len()),
                "medium",
                0.8,
                task.tags.clone(),
            ));
        }
    }
    for task in tasks.iter().filter(|t| t.is_active()) {
        let idle = task.days_since_update(now);
        if idle >= STALE_DAYS {
            out.push(rec(
                "review",
                format!("Review '{}'", task.title),
                format!("Decide whether {} should continue, pause, or close.", task.id),
                format!("No updates for {idle} days."),
                "high",
                0.7,
                task.tags.clone(),
            ));
        }
    }
    let mut active_by_type: BTreeMap<TaskType, usize> = BTreeMap::new();
    for task in tasks.iter().filter(|t| t.is_active()) {
        *active_by_type.entry(task.task_type).or_default() += 1;
    }
    for (ty, n) in active_by_type {
        if n >= REPEAT_ACTIVE {
            out.push(rec(
                "pattern",
                format!("Build on your {ty} momentum"),
                format!("You keep {ty} work moving; plan the next {ty} task before these close."),
                format!("{n} active {ty} tasks."),
                "low",
                0.6,
                vec![ty.to_string()],
            ));
        }
    }
    out
}

fn learning(tasks: &[&Task], now: DateTime<Utc>, limit: usize) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let learning = || tasks.iter().filter(|t| t.task_type == TaskType::Learning);
    for task in learning().filter(|t| t.status == TaskStatus::Completed) {
        let idle = task.days_since_update(now);
        if idle >= LEARNING_REVIEW_DAYS {
            out.push(rec(
                "review",
                format!("Revisit '{}'", task.title),
                "Refresh what you learned with a short review session.".to_string(),
                format!("Completed {idle} days ago."),
                "low",
                0.7,
                task.tags.clone(),
            ));
        }
    }
    for task in learning().filter(|t| t.is_active()) {
        if task.entries.len() >= PRACTICE_ENTRIES {
            out.push(rec(
                "practice",
                format!("Practice project for '{}'", task.title),
                "Apply the material in a small hands-on task.".to_string(),
                format!("{} entries of study so far.", task.entries.len()),
                "medium",
                0.75,
                task.tags.clone(),
            ));
        }
    }
    if out.len() < limit {
        out.push(rec(
            "explore",
            "Explore a new area".to_string(),
            "Start a learning task on a topic you have not covered yet.".to_string(),
            "Regular exploration keeps skills broad.".to_string(),
            "low",
            0.4,
            vec!["learning".to_string()],
        ));
    }
    out
}

fn completion(tasks: &[&Task], now: DateTime<Utc>) -> Vec<Recommendation> {
    let mut out = Vec::new();
    for task in tasks.iter().filter(|t| t.is_active()) {
        if task.entries.len() >= NEAR_DONE_ENTRIES && task.days_since_update(now) <= NEAR_DONE_DAYS {
            out.push(rec(
                "completion",
                format!("Finish '{}'", task.title),
                format!("{} has recent momentum and may be close to done.", task.id),
                format!("{} entries, updated in the last {NEAR_DONE_DAYS} days.", task.entries.len()),
                "high",
                0.8,
                task.tags.clone(),
            ));
        }
    }
    for task in tasks.iter().filter(|t| t.status == TaskStatus::Paused) {
        out.push(rec(
            "resume",
            format!("Resume '{}'", task.title),
            format!("Pick {} back up or mark it completed.", task.id),
            format!("Paused, last updated {} days ago.", task.days_since_update(now)),
            "medium",
            0.6,
            task.tags.clone(),
        ));
    }
    out
}

fn priority(tasks: &[&Task], now: DateTime<Utc>) -> Vec<Recommendation> {
    let mut out = Vec::new();
    for task in tasks.iter().filter(|t| t.is_active()) {
        if task
            .priority
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("urgent"))
        {
            out.push(rec(
                "urgent",
                format!("Focus on '{}'", task.title),
                format!("{} is marked urgent.", task.id),
                "Urgent tasks should be handled before anything else.".to_string(),
                "urgent",
                0.9,
                task.tags.clone(),
            ));
        }
    }
    for task in tasks.iter().filter(|t| t.is_active()) {
        let age = task.age_days(now);
        if age >= REPRIORITIZE_AGE_DAYS {
            out.push(rec(
                "reprioritize",
                format!("Re-prioritize '{}'", task.title),
                format!("Check whether {} still matters at its current priority.", task.id),
                format!("Open for {age} days."),
                "medium",
                0.5,
                task.tags.clone(),
            ));
        }
    }
    out
}

/// Recommendations for `tasks` under the request's focus area.
#[must_use]
pub fn recommend(tasks: &[Task], req: &RecommendationsRequest, now: DateTime<Utc>) -> Recommendations {
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| req.task_type.is_none_or(|ty| t.task_type == ty))
        .collect();
    selected.sort_by(|a, b| a.id.cmp(&b.id));

    let mut recommendations = match req.focus_area {
        FocusArea::Productivity => productivity(&selected, now),
        FocusArea::Learning => learning(&selected, now, req.limit),
        FocusArea::Completion => completion(&selected, now),
        FocusArea::Priority => priority(&selected, now),
    };
    recommendations.truncate(req.limit);

    let mut by_status = BTreeMap::new();
    for task in &selected {
        *by_status.entry(task.status.to_string()).or_default() += 1;
    }
    let summary = format!(
        "{} {} recommendation(s) from {} task(s).",
        recommendations.len(),
        req.focus_area,
        selected.len()
    );
    Recommendations {
        recommendations,
        analysis_metrics: AnalysisMetrics {
            focus_area: req.focus_area,
            tasks_analyzed: selected.len(),
            by_status,
        },
        summary,
        skipped_records: Vec::new(),
    }
}

impl Markdown for Recommendations {
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "# Recommendations ({})\n\n{}\n\n",
            self.analysis_metrics.focus_area, self.summary
        );
        if self.recommendations.is_empty() {
            out.push_str("Nothing to suggest right now.\n");
            return out;
        }
        for (i, r) in self.recommendations.iter().enumerate() {
            let _ = writeln!(out, "## {}. {}", i + 1, r.title);
            let _ = writeln!(
                out,
                "**Type:** {} | **Priority:** {} | **Confidence:** {:.0}%",
                r.kind,
                r.priority,
                r.confidence * 100.0
            );
            let _ = writeln!(out, "{}\n\n_{}_", r.description, r.rationale);
            if !r.suggested_tags.is_empty() {
                let _ = writeln!(out, "**Tags:** {}", r.suggested_tags.join(", "));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use jot_core::entities::{Entry, entry_kind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap()
    }

    fn ago(days: i64) -> DateTime<Utc> {
        now() - Duration::days(days)
    }

    fn task(id: &str, ty: TaskType, created: i64) -> Task {
        Task::new(id, id, ty, ago(created))
    }

    fn with_entries(mut task: Task, n: usize, days_ago: i64) -> Task {
        for i in 0..n {
            task.push_entry(Entry::new(ago(days_ago), format!("e{i}"), entry_kind::LOG), ago(days_ago));
        }
        task
    }

    fn request(focus_area: FocusArea, limit: usize) -> RecommendationsRequest {
        RecommendationsRequest {
            task_type: None,
            focus_area,
            limit,
        }
    }

    fn kinds(r: &Recommendations) -> Vec<(&str, f64)> {
        r.recommendations
            .iter()
            .map(|r| (r.kind.as_str(), r.confidence))
            .collect()
    }

    #[test]
    fn productivity_rules() {
        let tasks = vec![
            with_entries(task("big", TaskType::Work, 20), 10, 1),
            task("idle", TaskType::Work, 9),
            task("fresh", TaskType::Work, 1),
        ];
        let r = recommend(&tasks, &request(FocusArea::Productivity, 20), now());
        assert_eq!(kinds(&r), [("breakdown", 0.8), ("review", 0.7), ("pattern", 0.6)]);
        assert_eq!(r.recommendations[0].title, "Break down 'big'");
        assert_eq!(r.recommendations[1].title, "Review 'idle'");
        assert_eq!(r.recommendations[2].suggested_tags, ["work"]);
    }

    #[test]
    fn learning_rules_and_explore_filler() {
        let mut old = task("old", TaskType::Learning, 90);
        old.change_status(TaskStatus::Completed, None, ago(45));
        let studying = with_entries(task("rust", TaskType::Learning, 10), 4, 1);
        let r = recommend(&[old, studying], &request(FocusArea::Learning, 5), now());
        assert_eq!(kinds(&r), [("review", 0.7), ("practice", 0.75), ("explore", 0.4)]);
    }

    #[test]
    fn explore_only_when_room_remains() {
        let studying = with_entries(task("rust", TaskType::Learning, 10), 4, 1);
        let r = recommend(&[studying], &request(FocusArea::Learning, 1), now());
        assert_eq!(kinds(&r), [("practice", 0.75)]);
    }

    #[test]
    fn completion_rules() {
        let close = with_entries(task("close", TaskType::Work, 10), 2, 1);
        let mut paused = task("paused", TaskType::Work, 10);
        paused.change_status(TaskStatus::Paused, None, ago(5));
        let r = recommend(&[close, paused], &request(FocusArea::Completion, 5), now());
        assert_eq!(kinds(&r), [("completion", 0.8), ("resume", 0.6)]);
    }

    #[test]
    fn priority_rules() {
        let mut urgent = task("hot", TaskType::Work, 1);
        urgent.priority = Some("Urgent".into());
        let ancient = task("ancient", TaskType::Personal, 40);
        let r = recommend(&[urgent, ancient], &request(FocusArea::Priority, 5), now());
        assert_eq!(kinds(&r), [("urgent", 0.9), ("reprioritize", 0.5)]);
    }

    #[test]
    fn limit_and_type_filter() {
        let tasks: Vec<Task> = (0..6).map(|i| task(&format!("t{i}"), TaskType::Work, 10)).collect();
        let r = recommend(&tasks, &request(FocusArea::Productivity, 2), now());
        assert_eq!(r.recommendations.len(), 2);

        let req = RecommendationsRequest {
            task_type: Some(TaskType::Learning),
            ..request(FocusArea::Productivity, 5)
        };
        let r = recommend(&tasks, &req, now());
        assert!(r.recommendations.is_empty());
        assert_eq!(r.analysis_metrics.tasks_analyzed, 0);
    }

    #[test]
    fn markdown_numbering() {
        let r = recommend(&[], &request(FocusArea::Learning, 5), now());
        let md = r.to_markdown();
        assert!(md.contains("## 1. Explore a new area\n**Type:** explore | **Priority:** low | **Confidence:** 40%\n"));
    }
}
