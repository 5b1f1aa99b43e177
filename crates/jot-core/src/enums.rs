//! Enumerated choices for Jot.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and implement [`Choice`], which lists the accepted values so argument
//! validation can report them back to the caller.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

/// A closed set of string-encoded values.
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// The wire/storage representation.
    fn name(self) -> &'static str;

    /// Comma-separated list of accepted values, for error messages.
    #[must_use]
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|v| v.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a choice case-insensitively, reporting the accepted values on failure.
///
/// # Errors
///
/// Returns `CoreError::InvalidValue` if `raw` does not name any variant.
pub fn parse_choice<T: Choice>(raw: &str, field: &str) -> Result<T, CoreError> {
    let normalized = raw.trim().to_ascii_lowercase();
    T::ALL
        .iter()
        .copied()
        .find(|v| v.name() == normalized)
        .ok_or_else(|| CoreError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
            expected: T::expected(),
        })
}

macro_rules! choice_impls {
    ($ty:ty) => {
        impl Choice for $ty {
            const ALL: &'static [Self] = <$ty>::ALL;

            fn name(self) -> &'static str {
                self.as_str()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// TaskType
// ---------------------------------------------------------------------------

/// Category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Work,
    Learning,
    Personal,
    Investigation,
}

impl TaskType {
    pub const ALL: &'static [Self] = &[
        Self::Work,
        Self::Learning,
        Self::Personal,
        Self::Investigation,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Learning => "learning",
            Self::Personal => "personal",
            Self::Investigation => "investigation",
        }
    }
}

choice_impls!(TaskType);

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a task.
///
/// Transitions are caller-driven and unrestricted: any status may follow any
/// other. Every change is recorded as a `status_change` entry on the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Active,
    Completed,
    Paused,
    Blocked,
}

impl TaskStatus {
    pub const ALL: &'static [Self] = &[
        Self::Active,
        Self::Completed,
        Self::Paused,
        Self::Blocked,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Blocked => "blocked",
        }
    }
}

choice_impls!(TaskStatus);

// ---------------------------------------------------------------------------
// ImportFormat / ExportFormat
// ---------------------------------------------------------------------------

/// Input formats accepted by the import pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    Txt,
    Markdown,
    Json,
    Csv,
}

impl ImportFormat {
    pub const ALL: &'static [Self] = &[Self::Txt, Self::Markdown, Self::Json, Self::Csv];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

choice_impls!(ImportFormat);

/// Output formats produced by export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Markdown,
    Csv,
}

impl ExportFormat {
    pub const ALL: &'static [Self] = &[Self::Json, Self::Markdown, Self::Csv];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Csv => "csv",
        }
    }
}

choice_impls!(ExportFormat);

// ---------------------------------------------------------------------------
// ReportType / TimePeriod
// ---------------------------------------------------------------------------

/// Which sections an analytics report carries beyond the task metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    Overview,
    Productivity,
    Patterns,
    Trends,
}

impl ReportType {
    pub const ALL: &'static [Self] = &[
        Self::Overview,
        Self::Productivity,
        Self::Patterns,
        Self::Trends,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Productivity => "productivity",
            Self::Patterns => "patterns",
            Self::Trends => "trends",
        }
    }

    #[must_use]
    pub const fn includes_productivity(self) -> bool {
        matches!(self, Self::Overview | Self::Productivity)
    }

    #[must_use]
    pub const fn includes_patterns(self) -> bool {
        matches!(self, Self::Overview | Self::Patterns)
    }

    #[must_use]
    pub const fn includes_trends(self) -> bool {
        matches!(self, Self::Overview | Self::Trends)
    }
}

choice_impls!(ReportType);

/// Analysis window ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    All,
}

impl TimePeriod {
    pub const ALL: &'static [Self] = &[
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
        Self::All,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    /// Window length in days, or `None` for the unbounded period.
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Quarter => Some(90),
            Self::Year => Some(365),
            Self::All => None,
        }
    }
}

choice_impls!(TimePeriod);

// ---------------------------------------------------------------------------
// FocusArea
// ---------------------------------------------------------------------------

/// Heuristic family selected when requesting recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    #[default]
    Productivity,
    Learning,
    Completion,
    Priority,
}

impl FocusArea {
    pub const ALL: &'static [Self] = &[
        Self::Productivity,
        Self::Learning,
        Self::Completion,
        Self::Priority,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Productivity => "productivity",
            Self::Learning => "learning",
            Self::Completion => "completion",
            Self::Priority => "priority",
        }
    }
}

choice_impls!(FocusArea);

// ---------------------------------------------------------------------------
// SearchContext / TrendDirection
// ---------------------------------------------------------------------------

/// Which part of a record matched a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SearchContext {
    Task,
    Entry,
    Both,
    OneOnOne,
}

impl SearchContext {
    pub const ALL: &'static [Self] = &[Self::Task, Self::Entry, Self::Both, Self::OneOnOne];

    /// Classify a task hit from its title and entry match flags.
    #[must_use]
    pub const fn classify(title_matches: bool, entry_matches: bool) -> Option<Self> {
        match (title_matches, entry_matches) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Task),
            (false, true) => Some(Self::Entry),
            (false, false) => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Entry => "entry",
            Self::Both => "both",
            Self::OneOnOne => "one-on-one",
        }
    }
}

choice_impls!(SearchContext);

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub const ALL: &'static [Self] = &[Self::Up, Self::Down, Self::Stable];

    /// Classify a percentage change against a symmetric threshold.
    #[must_use]
    pub fn from_change(change: f64, threshold: f64) -> Self {
        if change > threshold {
            Self::Up
        } else if change < -threshold {
            Self::Down
        } else {
            Self::Stable
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

choice_impls!(TrendDirection);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("active", TaskStatus::Active)]
    #[case("Completed", TaskStatus::Completed)]
    #[case(" paused ", TaskStatus::Paused)]
    #[case("blocked", TaskStatus::Blocked)]
    fn parses_status(#[case] raw: &str, #[case] expected: TaskStatus) {
        assert_eq!(parse_choice::<TaskStatus>(raw, "status").unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_status_with_expected_list() {
        let err = parse_choice::<TaskStatus>("done", "status").unwrap_err();
        assert_eq!(
            err.to_string(),
            "status must be one of: active, completed, paused, blocked (got 'done')"
        );
    }

    #[test]
    fn import_format_expected_list() {
        assert_eq!(ImportFormat::expected(), "txt, markdown, json, csv");
    }

    #[test]
    fn serde_matches_as_str() {
        for ty in TaskType::ALL {
            let json = serde_json::to_string(ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
        let json = serde_json::to_string(&SearchContext::OneOnOne).unwrap();
        assert_eq!(json, "\"one-on-one\"");
    }

    #[test]
    fn report_sections() {
        assert!(ReportType::Overview.includes_trends());
        assert!(ReportType::Trends.includes_trends());
        assert!(!ReportType::Productivity.includes_trends());
        assert!(ReportType::Patterns.includes_patterns());
        assert!(!ReportType::Patterns.includes_productivity());
    }

    #[test]
    fn period_lengths() {
        assert_eq!(TimePeriod::Week.days(), Some(7));
        assert_eq!(TimePeriod::All.days(), None);
        assert_eq!(TimePeriod::default(), TimePeriod::Month);
    }

    #[rstest]
    #[case(12.0, 10.0, TrendDirection::Up)]
    #[case(10.0, 10.0, TrendDirection::Stable)]
    #[case(-5.5, 5.0, TrendDirection::Down)]
    #[case(0.0, 5.0, TrendDirection::Stable)]
    fn trend_direction(#[case] change: f64, #[case] threshold: f64, #[case] expected: TrendDirection) {
        assert_eq!(TrendDirection::from_change(change, threshold), expected);
    }

    #[test]
    fn search_context_classification() {
        assert_eq!(SearchContext::classify(true, true), Some(SearchContext::Both));
        assert_eq!(SearchContext::classify(false, true), Some(SearchContext::Entry));
        assert_eq!(SearchContext::classify(true, false), Some(SearchContext::Task));
        assert_eq!(SearchContext::classify(false, false), None);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", TaskType::Investigation), "investigation");
        assert_eq!(format!("{}", FocusArea::Completion), "completion");
        assert_eq!(format!("{}", TimePeriod::Quarter), "quarter");
        assert_eq!(format!("{}", ExportFormat::Csv), "csv");
        assert_eq!(format!("{}", TrendDirection::Stable), "stable");
    }
}
