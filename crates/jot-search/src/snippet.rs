//! Display excerpts for long entry content.

/// Content up to this many characters is shown whole.
pub const MAX_INLINE_CHARS: usize = 200;
/// Characters kept before the first match.
pub const CONTEXT_BEFORE: usize = 50;
/// Characters kept after the end of the first match.
pub const CONTEXT_AFTER: usize = 100;

const ELLIPSIS: &str = "...";

/// Case-insensitive position of `needle` in `haystack`, as a half-open range
/// of character indices into `haystack`.
///
/// `needle` must already be lowercase.
#[must_use]
pub fn find_ci(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    // Lowercasing can expand one char into several; remember where each
    // lowered char came from.
    let lowered: Vec<(char, usize)> = haystack
        .chars()
        .enumerate()
        .flat_map(|(i, c)| c.to_lowercase().map(move |lc| (lc, i)))
        .collect();
    let needle: Vec<char> = needle.chars().collect();
    let start = lowered
        .windows(needle.len())
        .position(|w| w.iter().map(|(c, _)| *c).eq(needle.iter().copied()))?;
    let first = lowered[start].1;
    let last = lowered[start + needle.len() - 1].1;
    Some((first, last + 1))
}

/// Excerpt `content` for display around the first match of `query`.
///
/// Short content is returned unchanged. Long content is windowed around the
/// match and wrapped in `...`; without a match the first
/// [`MAX_INLINE_CHARS`] characters are kept.
#[must_use]
pub fn snippet(content: &str, query: &str) -> String {
    let len = content.chars().count();
    if len <= MAX_INLINE_CHARS {
        return content.to_string();
    }
    match find_ci(content, query) {
        Some((start, end)) => {
            let from = start.saturating_sub(CONTEXT_BEFORE);
            let to = (end + CONTEXT_AFTER).min(len);
            let window: String = content.chars().skip(from).take(to - from).collect();
            format!("{ELLIPSIS}{window}{ELLIPSIS}")
        }
        None => {
            let head: String = content.chars().take(MAX_INLINE_CHARS).collect();
            format!("{head}{ELLIPSIS}")
        }
    }
}
