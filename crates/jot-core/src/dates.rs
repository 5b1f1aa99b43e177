//! Date parsing with the strict/lenient split used across operations.
//!
//! Primary date operands (the date of a daily log, a meeting, a week start)
//! are parsed strictly and rejected when malformed. Filter-only dates
//! (`date_from` / `date_to`) are parsed leniently: a malformed value means
//! "no filter", never an error.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::errors::CoreError;

/// Storage and lookup key format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a primary date operand.
///
/// # Errors
///
/// Returns `CoreError::MissingArgument` for a blank value and
/// `CoreError::InvalidDate` when the value is not `YYYY-MM-DD`.
pub fn parse_date_strict(raw: &str, field: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::MissingArgument(field.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a filter-only date, ignoring malformed input.
#[must_use]
pub fn parse_date_lenient(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(value = raw, "ignoring malformed filter date");
            None
        }
    }
}

/// Midnight UTC at the start of `date`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

/// Midnight UTC at the start of the day after `date`.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date.checked_add_days(Days::new(1)).unwrap_or(date))
}

/// The `YYYY-MM-DD` key for a timestamp.
#[must_use]
pub fn date_key(ts: DateTime<Utc>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

/// An optional, inclusive date window over UTC timestamps.
///
/// `to` is the end of the last included day, so a range built from
/// `date_to = 2025-01-05` still contains `2025-01-05T23:59:59Z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build a range from filter strings, dropping any that fail to parse.
    #[must_use]
    pub fn lenient(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: parse_date_lenient(from).map(start_of_day),
            to: parse_date_lenient(to).map(end_of_day),
        }
    }

    /// Whether neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `ts` falls inside the window (both ends inclusive).
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| ts >= from) && self.to.is_none_or(|to| ts <= to)
    }
}
