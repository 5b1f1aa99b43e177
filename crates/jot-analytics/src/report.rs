//! The analytics report and its markdown rendering.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use jot_core::entities::Task;
use jot_core::enums::{ReportType, TimePeriod};
use jot_core::markdown::Markdown;
use jot_core::requests::AnalyticsRequest;
use jot_core::responses::SkippedRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::insights::insights;
use crate::metrics::{
    PatternAnalysis, ProductivityMetrics, TaskMetrics, pattern_analysis, productivity_metrics,
    task_metrics,
};
use crate::period::Window;
use crate::trends::{Trend, trends};

/// Response from `GetAnalyticsReport`.
///
/// Sections not selected by `report_type` are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalyticsReport {
    pub report_type: ReportType,
    pub time_period: TimePeriod,
    pub generated_at: DateTime<Utc>,
    pub summary: String,
    pub task_metrics: TaskMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub productivity_metrics: Option<ProductivityMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_analysis: Option<PatternAnalysis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trends: Vec<Trend>,
    pub insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_records: Vec<SkippedRecord>,
}

/// Build a report over `tasks`, which the caller has already type-filtered.
#[must_use]
pub fn build_report(tasks: &[Task], req: &AnalyticsRequest, now: DateTime<Utc>) -> AnalyticsReport {
    let window = Window::new(req.time_period, now);
    let metrics = task_metrics(tasks);
    let patterns = pattern_analysis(tasks);
    let productivity = productivity_metrics(tasks, &window);
    let observations = insights(tasks, &metrics, &patterns, now);

    let summary = summarize(req, &metrics, &productivity);
    AnalyticsReport {
        report_type: req.report_type,
        time_period: req.time_period,
        generated_at: now,
        summary,
        task_metrics: metrics,
        productivity_metrics: req.report_type.includes_productivity().then_some(productivity),
        pattern_analysis: req.report_type.includes_patterns().then_some(patterns),
        trends: if req.report_type.includes_trends() {
            trends(tasks, &window)
        } else {
            Vec::new()
        },
        insights: observations,
        skipped_records: Vec::new(),
    }
}

fn summarize(req: &AnalyticsRequest, m: &TaskMetrics, p: &ProductivityMetrics) -> String {
    let scope = match req.time_period {
        TimePeriod::All => "all time".to_string(),
        period => format!("the last {period}"),
    };
    let filter = req
        .task_type
        .map_or_else(String::new, |ty| format!(" {ty}"));
    format!(
        "{} report for {scope}: {} total{filter} task(s), {:.0}% completed, {} entries ({} in period).",
        capitalize(req.report_type.as_str()),
        m.total_tasks,
        m.completion_rate * 100.0,
        m.total_entries,
        p.entries_added_period
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn counts(out: &mut String, label: &str, map: &std::collections::BTreeMap<String, usize>) {
    if map.is_empty() {
        return;
    }
    let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    let _ = writeln!(out, "- **{label}:** {}", parts.join(", "));
}

impl Markdown for AnalyticsReport {
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "# Analytics Report ({}, {})\n\n{}\n\n",
            self.report_type, self.time_period, self.summary
        );

        let m = &self.task_metrics;
        out.push_str("## Task Metrics\n");
        let _ = writeln!(out, "- **Total tasks:** {}", m.total_tasks);
        counts(&mut out, "By status", &m.by_status);
        counts(&mut out, "By type", &m.by_type);
        counts(&mut out, "By priority", &m.by_priority);
        let _ = writeln!(out, "- **Completion rate:** {:.1}%", m.completion_rate * 100.0);
        let _ = writeln!(out, "- **Entries per task:** {:.1}\n", m.average_entries_per_task);

        if let Some(p) = &self.productivity_metrics {
            out.push_str("## Productivity\n");
            let _ = writeln!(out, "- **Completed in period:** {}", p.tasks_completed_period);
            let _ = writeln!(out, "- **Entries in period:** {}", p.entries_added_period);
            let _ = writeln!(out, "- **Average completion:** {:.1} days", p.average_task_duration_days);
            if let Some(ty) = p.most_productive_type {
                let _ = writeln!(out, "- **Most productive type:** {ty}");
            }
            let _ = writeln!(out, "- **Productivity score:** {:.2}\n", p.productivity_score);
        }

        if let Some(p) = &self.pattern_analysis {
            out.push_str("## Patterns\n");
            if let Some(ty) = p.most_frequent_type {
                let _ = writeln!(out, "- **Most frequent type:** {ty}");
            }
            if !p.common_tags.is_empty() {
                let tags: Vec<String> = p
                    .common_tags
                    .iter()
                    .map(|t| format!("{} ({})", t.tag, t.count))
                    .collect();
                let _ = writeln!(out, "- **Common tags:** {}", tags.join(", "));
            }
            let _ = writeln!(
                out,
                "- **Work patterns:** {} intensive, {} light",
                p.work_patterns.intensive, p.work_patterns.light
            );
            for (ty, days) in &p.time_to_completion_by_type {
                let _ = writeln!(out, "- **Time to complete ({ty}):** {days:.1} days");
            }
            out.push('\n');
        }

        if !self.trends.is_empty() {
            out.push_str("## Trends\n");
            for t in &self.trends {
                let _ = writeln!(
                    out,
                    "- **{}:** {} ({:+.1}%, {} vs {})",
                    t.metric, t.direction, t.change, t.current, t.previous
                );
            }
            out.push('\n');
        }

        out.push_str("## Insights\n");
        for insight in &self.insights {
            let _ = writeln!(out, "- {insight}");
        }
        out
    }
}
