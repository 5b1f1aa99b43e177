//! Analysis windows ending at "now".

use chrono::{DateTime, Duration, Utc};
use jot_core::enums::TimePeriod;

/// The current window and, for bounded periods, the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub period: TimePeriod,
    /// Start of the current window. `None` for [`TimePeriod::All`].
    pub cutoff: Option<DateTime<Utc>>,
    /// Start of the preceding window of equal length.
    pub previous_start: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

impl Window {
    #[must_use]
    pub fn new(period: TimePeriod, now: DateTime<Utc>) -> Self {
        let length = period.days().map(Duration::days);
        let cutoff = length.map(|d| now - d);
        Self {
            period,
            cutoff,
            previous_start: cutoff.zip(length).map(|(c, d)| c - d),
            now,
        }
    }

    /// Whether `ts` falls in the current window.
    #[must_use]
    pub fn in_current(&self, ts: DateTime<Utc>) -> bool {
        self.cutoff.is_none_or(|c| ts >= c) && ts <= self.now
    }

    /// Whether `ts` falls in the preceding window. Always false for `All`.
    #[must_use]
    pub fn in_previous(&self, ts: DateTime<Utc>) -> bool {
        match (self.previous_start, self.cutoff) {
            (Some(start), Some(cutoff)) => ts >= start && ts < cutoff,
            _ => false,
        }
    }
}
