//! Task, productivity, and pattern metrics.

use std::collections::{BTreeMap, HashMap};

use jot_core::entities::Task;
use jot_core::enums::{Choice, TaskStatus, TaskType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::period::Window;

/// Bucket for tasks without a priority.
pub const NO_PRIORITY: &str = "none";

/// Entry count at which a task counts as intensive work.
pub const INTENSIVE_ENTRIES: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskMetrics {
    pub total_tasks: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    /// Completed over total, in `0.0..=1.0`.
    pub completion_rate: f64,
    pub average_entries_per_task: f64,
    pub total_entries: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProductivityMetrics {
    pub tasks_completed_period: usize,
    pub entries_added_period: usize,
    pub average_task_duration_days: f64,
    pub most_productive_type: Option<TaskType>,
    pub productivity_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkPatterns {
    /// Tasks with at least [`INTENSIVE_ENTRIES`] entries.
    pub intensive: usize,
    pub light: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PatternAnalysis {
    pub most_frequent_type: Option<TaskType>,
    /// Tags used on more than one task, most frequent first.
    pub common_tags: Vec<TagCount>,
    pub work_patterns: WorkPatterns,
    pub time_to_completion_by_type: BTreeMap<TaskType, f64>,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// The type with the highest count. Ties go to the type listed first in
/// [`TaskType::ALL`]; zero counts never win.
fn leading_type(counts: &HashMap<TaskType, usize>) -> Option<TaskType> {
    let mut best: Option<(TaskType, usize)> = None;
    for &ty in <TaskType as Choice>::ALL {
        let n = counts.get(&ty).copied().unwrap_or(0);
        if n > 0 && best.is_none_or(|(_, b)| n > b) {
            best = Some((ty, n));
        }
    }
    best.map(|(ty, _)| ty)
}

#[must_use]
pub fn task_metrics(tasks: &[Task]) -> TaskMetrics {
    let mut m = TaskMetrics {
        total_tasks: tasks.len(),
        ..TaskMetrics::default()
    };
    for task in tasks {
        *m.by_status.entry(task.status.to_string()).or_default() += 1;
        *m.by_type.entry(task.task_type.to_string()).or_default() += 1;
        let priority = task
            .priority
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(NO_PRIORITY);
        *m.by_priority.entry(priority.to_string()).or_default() += 1;
        m.total_entries += task.entries.len();
    }
    let completed = tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
    m.completion_rate = ratio(completed, tasks.len());
    m.average_entries_per_task = ratio(m.total_entries, tasks.len());
    m
}

#[must_use]
pub fn productivity_metrics(tasks: &[Task], window: &Window) -> ProductivityMetrics {
    let completed_in_period = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed && window.in_current(t.updated))
        .count();

    let mut entries_by_type: HashMap<TaskType, usize> = HashMap::new();
    let mut entries_in_period = 0;
    for task in tasks {
        let n = task.entries.iter().filter(|e| window.in_current(e.timestamp)).count();
        entries_in_period += n;
        *entries_by_type.entry(task.task_type).or_default() += n;
    }

    let durations: Vec<f64> = tasks.iter().filter_map(Task::completion_days).collect();

    #[allow(clippy::cast_precision_loss)]
    let score = if tasks.is_empty() {
        0.0
    } else {
        0.1f64.mul_add(entries_in_period as f64, 2.0 * completed_in_period as f64)
            / tasks.len() as f64
    };

    ProductivityMetrics {
        tasks_completed_period: completed_in_period,
        entries_added_period: entries_in_period,
        average_task_duration_days: mean(&durations),
        most_productive_type: leading_type(&entries_by_type),
        productivity_score: score,
    }
}

#[must_use]
pub fn pattern_analysis(tasks: &[Task]) -> PatternAnalysis {
    let mut by_type: HashMap<TaskType, usize> = HashMap::new();
    let mut tags: HashMap<&str, usize> = HashMap::new();
    let mut patterns = WorkPatterns::default();
    let mut durations: BTreeMap<TaskType, Vec<f64>> = BTreeMap::new();

    for task in tasks {
        *by_type.entry(task.task_type).or_default() += 1;
        for tag in &task.tags {
            *tags.entry(tag.as_str()).or_default() += 1;
        }
        if task.entries.len() >= INTENSIVE_ENTRIES {
            patterns.intensive += 1;
        } else {
            patterns.light += 1;
        }
        if let Some(days) = task.completion_days() {
            durations.entry(task.task_type).or_default().push(days);
        }
    }

    let mut common_tags: Vec<TagCount> = tags
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    common_tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

    PatternAnalysis {
        most_frequent_type: leading_type(&by_type),
        common_tags,
        work_patterns: patterns,
        time_to_completion_by_type: durations
            .into_iter()
            .map(|(ty, days)| (ty, mean(&days)))
            .collect(),
    }
}
