//! Embedded timestamp extraction for imported lines.
//!
//! A line is scanned token by token from the left. At each token the
//! matchers are tried in order and the first that parses wins, so the
//! earliest date in the line is the one used. A matcher looks at one or two
//! whitespace-separated tokens; a token that resembles a date but is not a
//! real calendar date fails every matcher and stays in the content.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// One way of reading a timestamp from the start of a text slice.
pub trait TimestampMatcher: Sync {
    /// Parse the leading token(s) of `line`. Returns the timestamp and the
    /// remaining text.
    fn extract<'a>(&self, line: &'a str) -> Option<(DateTime<Utc>, &'a str)>;
}

/// A chrono format string covering a fixed number of leading tokens.
struct FormatMatcher {
    format: &'static str,
    tokens: usize,
    with_time: bool,
}

impl FormatMatcher {
    fn parse(&self, token: &str) -> Option<DateTime<Utc>> {
        if self.with_time {
            NaiveDateTime::parse_from_str(token, self.format)
                .ok()
                .map(|dt| dt.and_utc())
        } else {
            NaiveDate::parse_from_str(token, self.format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        }
    }
}

impl TimestampMatcher for FormatMatcher {
    fn extract<'a>(&self, line: &'a str) -> Option<(DateTime<Utc>, &'a str)> {
        let (token, rest) = split_tokens(line, self.tokens)?;
        let ts = self.parse(&token)?;
        Some((ts, rest))
    }
}

/// The first `n` whitespace-separated tokens joined by one space, and
/// whatever follows them.
fn split_tokens(line: &str, n: usize) -> Option<(String, &str)> {
    let mut rest = line.trim_start();
    let mut tokens = Vec::with_capacity(n);
    for _ in 0..n {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some((tokens.join(" "), rest))
}

/// Matchers in priority order.
static MATCHERS: [FormatMatcher; 4] = [
    FormatMatcher {
        format: "%Y-%m-%d %H:%M",
        tokens: 2,
        with_time: true,
    },
    FormatMatcher {
        format: "%Y-%m-%d",
        tokens: 1,
        with_time: false,
    },
    FormatMatcher {
        format: "%m/%d/%Y %H:%M",
        tokens: 2,
        with_time: true,
    },
    FormatMatcher {
        format: "%m/%d/%Y",
        tokens: 1,
        with_time: false,
    },
];

/// Separators allowed between a timestamp and the text, e.g. `2024-01-01 - note`.
const SEPARATORS: &[char] = &['-', ':', '|'];

/// Byte offsets at which whitespace-separated tokens begin.
fn token_starts(line: &str) -> impl Iterator<Item = usize> + '_ {
    line.char_indices()
        .filter(move |&(i, c)| {
            !c.is_whitespace() && line[..i].chars().next_back().is_none_or(char::is_whitespace)
        })
        .map(|(i, _)| i)
}

/// Extract the first embedded timestamp from `line`.
///
/// Returns the timestamp (if any matcher succeeded) and the content with
/// the token and any adjoining separator removed.
#[must_use]
pub fn extract(line: &str) -> (Option<DateTime<Utc>>, String) {
    for start in token_starts(line) {
        let (before, from) = line.split_at(start);
        let Some((ts, rest)) = MATCHERS.iter().find_map(|m| m.extract(from)) else {
            continue;
        };
        let before = before.trim().trim_end_matches(SEPARATORS).trim_end();
        let after = rest.trim_start_matches(SEPARATORS).trim();
        let content = match (before.is_empty(), after.is_empty()) {
            (true, _) => after.to_string(),
            (false, true) => before.to_string(),
            (false, false) => format!("{before} {after}"),
        };
        return (Some(ts), content);
    }
    (None, line.trim().to_string())
}

/// Parse a value that must be a timestamp in its entirety.
///
/// Accepts RFC 3339 as well as every matcher format.
#[must_use]
pub fn parse_exact(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    match extract(value) {
        (Some(ts), rest) if rest.is_empty() => Some(ts),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[rstest]
    #[case("2024-01-02 15:30 Deployed", Some(utc(2024, 1, 2, 15, 30)), "Deployed")]
    #[case("2024-01-01 First entry", Some(utc(2024, 1, 1, 0, 0)), "First entry")]
    #[case("01/03/2024 09:05 Standup", Some(utc(2024, 1, 3, 9, 5)), "Standup")]
    #[case("01/03/2024 Final review", Some(utc(2024, 1, 3, 0, 0)), "Final review")]
    #[case("2024-01-01 - dashed", Some(utc(2024, 1, 1, 0, 0)), "dashed")]
    #[case("No date here", None, "No date here")]
    #[case("2024-02-30 not a real day", None, "2024-02-30 not a real day")]
    #[case("13/45/2024 bogus", None, "13/45/2024 bogus")]
    fn extracts_leading_timestamps(
        #[case] line: &str,
        #[case] ts: Option<DateTime<Utc>>,
        #[case] content: &str,
    ) {
        assert_eq!(extract(line), (ts, content.to_string()));
    }

    #[test]
    fn invalid_time_falls_back_to_date_only() {
        let (ts, content) = extract("2024-01-02 25:99 late night");
        assert_eq!(ts, Some(utc(2024, 1, 2, 0, 0)));
        assert_eq!(content, "25:99 late night");
    }

    #[rstest]
    #[case("Deployed 2024-01-02", Some(utc(2024, 1, 2, 0, 0)), "Deployed")]
    #[case("Released on 2024-01-02 to staging", Some(utc(2024, 1, 2, 0, 0)), "Released on to staging")]
    #[case("Standup: 01/03/2024 09:05 ran long", Some(utc(2024, 1, 3, 9, 5)), "Standup ran long")]
    #[case("Moved from 2024-02-30 to 2024-03-01", Some(utc(2024, 3, 1, 0, 0)), "Moved from 2024-02-30 to")]
    #[case("Two dates 2024-01-05 and 2024-01-06", Some(utc(2024, 1, 5, 0, 0)), "Two dates and 2024-01-06")]
    #[case("build v2024-01-02 passed", None, "build v2024-01-02 passed")]
    fn extracts_embedded_timestamps(
        #[case] line: &str,
        #[case] ts: Option<DateTime<Utc>>,
        #[case] content: &str,
    ) {
        assert_eq!(extract(line), (ts, content.to_string()));
    }

    #[rstest]
    #[case("2024-01-01T12:00:00Z", Some(utc(2024, 1, 1, 12, 0)))]
    #[case("2024-01-01", Some(utc(2024, 1, 1, 0, 0)))]
    #[case("2024-01-01 08:15", Some(utc(2024, 1, 1, 8, 15)))]
    #[case("2024-01-01 and more", None)]
    #[case("", None)]
    fn exact_parsing(#[case] value: &str, #[case] expected: Option<DateTime<Utc>>) {
        assert_eq!(parse_exact(value), expected);
    }
}
