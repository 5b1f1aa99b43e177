//! Period-over-period comparison.

use jot_core::entities::Task;
use jot_core::enums::{TimePeriod, TrendDirection};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::period::Window;

/// Percent change beyond which task creation counts as moving.
pub const TASK_THRESHOLD: f64 = 5.0;
/// Percent change beyond which entry activity counts as moving.
pub const ACTIVITY_THRESHOLD: f64 = 10.0;

pub const TASK_CREATION: &str = "task_creation";
pub const ENTRY_ACTIVITY: &str = "entry_activity";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Trend {
    pub metric: String,
    pub direction: TrendDirection,
    /// Percent change from the previous window.
    pub change: f64,
    pub period: TimePeriod,
    pub current: usize,
    pub previous: usize,
}

/// Percent change from `previous` to `current`. A zero baseline yields 100
/// when there is any current activity, else 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_change(previous: usize, current: usize) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

fn trend(metric: &str, previous: usize, current: usize, threshold: f64, period: TimePeriod) -> Trend {
    let change = percent_change(previous, current);
    Trend {
        metric: metric.to_string(),
        direction: TrendDirection::from_change(change, threshold),
        change,
        period,
        current,
        previous,
    }
}

/// Task-creation and entry-activity trends. Empty for [`TimePeriod::All`].
#[must_use]
pub fn trends(tasks: &[Task], window: &Window) -> Vec<Trend> {
    if window.cutoff.is_none() {
        return Vec::new();
    }
    let created_now = tasks.iter().filter(|t| window.in_current(t.created)).count();
    let created_before = tasks.iter().filter(|t| window.in_previous(t.created)).count();

    let entries = || tasks.iter().flat_map(|t| &t.entries);
    let active_now = entries().filter(|e| window.in_current(e.timestamp)).count();
    let active_before = entries().filter(|e| window.in_previous(e.timestamp)).count();

    vec![
        trend(TASK_CREATION, created_before, created_now, TASK_THRESHOLD, window.period),
        trend(ENTRY_ACTIVITY, active_before, active_now, ACTIVITY_THRESHOLD, window.period),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use jot_core::entities::{Entry, entry_kind};
    use jot_core::enums::TaskType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(0, 3, 100.0)]
    #[case(4, 5, 25.0)]
    #[case(10, 5, -50.0)]
    fn percent_changes(#[case] previous: usize, #[case] current: usize, #[case] expected: f64) {
        assert!((percent_change(previous, current) - expected).abs() < 1e-9);
    }

    #[test]
    fn week_over_week() {
        let w = Window::new(TimePeriod::Week, now());
        let mut old = Task::new("old", "Old", TaskType::Work, now() - Duration::days(10));
        let ts = now() - Duration::days(9);
        old.push_entry(Entry::new(ts, "x", entry_kind::LOG), ts);
        let new = Task::new("new", "New", TaskType::Work, now() - Duration::days(1));

        let t = trends(&[old, new], &w);
        assert_eq!(t[0].metric, TASK_CREATION);
        assert_eq!((t[0].previous, t[0].current), (1, 1));
        assert_eq!(t[0].direction, TrendDirection::Stable);
        assert_eq!((t[1].previous, t[1].current), (2, 1));
        assert_eq!(t[1].direction, TrendDirection::Down);
    }

    #[test]
    fn no_trends_for_all_time() {
        let w = Window::new(TimePeriod::All, now());
        assert!(trends(&[], &w).is_empty());
    }
}
