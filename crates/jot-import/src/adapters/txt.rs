use super::{BatchBuilder, ImportAdapter, ImportContext, ParsedBatch};
use crate::error::ImportError;
use crate::timestamp;

/// Plain text: one entry per non-blank line, all under a single journal task.
pub struct TxtAdapter;

impl ImportAdapter for TxtAdapter {
    fn parse(&self, content: &str, ctx: &ImportContext) -> Result<ParsedBatch, ImportError> {
        let mut builder = BatchBuilder::new(ctx);
        let mut warnings = Vec::new();
        let segment = format!("journal-{}", ctx.now.format("%Y%m%d"));
        let mut task = None;

        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (ts, text) = timestamp::extract(line);
            if text.is_empty() {
                warnings.push(format!("Line {}: timestamp without content, skipped", n + 1));
                continue;
            }
            let idx = *task.get_or_insert_with(|| builder.task_index("Imported journal", Some(&segment)));
            builder.push_entry(idx, ts.unwrap_or(ctx.now), &text);
        }

        let (tasks, _) = builder.finish();
        Ok(ParsedBatch { tasks, warnings })
    }
}
