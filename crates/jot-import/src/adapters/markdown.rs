use super::{BatchBuilder, ImportAdapter, ImportContext, ParsedBatch};
use crate::error::ImportError;
use crate::timestamp;

const BULLETS: &[&str] = &["- [ ] ", "- [x] ", "- [X] ", "- ", "* ", "+ "];

/// Markdown: `#` headers start tasks, other lines are entries of the last one.
pub struct MarkdownAdapter;

impl ImportAdapter for MarkdownAdapter {
    fn parse(&self, content: &str, ctx: &ImportContext) -> Result<ParsedBatch, ImportError> {
        let mut builder = BatchBuilder::new(ctx);
        let mut warnings = Vec::new();
        let mut current = None;

        for (n, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                let mut title = line.trim_start_matches('#').trim();
                if title.is_empty() {
                    warnings.push(format!("Line {}: empty header, using 'Untitled'", n + 1));
                    title = "Untitled";
                }
                current = Some(builder.task_index(title, None));
                continue;
            }

            let (ts, text) = timestamp::extract(strip_bullet(line));
            if text.is_empty() {
                warnings.push(format!("Line {}: timestamp without content, skipped", n + 1));
                continue;
            }
            let idx = *current.get_or_insert_with(|| builder.task_index("Imported notes", Some("notes")));
            builder.push_entry(idx, ts.unwrap_or(ctx.now), &text);
        }

        let (tasks, empty) = builder.finish();
        warnings.extend(
            empty
                .into_iter()
                .map(|title| format!("Section '{title}' has no entries, skipped")),
        );
        Ok(ParsedBatch { tasks, warnings })
    }
}

fn strip_bullet(line: &str) -> &str {
    BULLETS
        .iter()
        .find_map(|b| line.strip_prefix(b))
        .unwrap_or(line)
}
