use jot_core::markdown::Markdown;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + Markdown>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Markdown => Ok(value.to_markdown().trim_end().to_string()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + Markdown>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use jot_core::entities::Task;
    use jot_core::enums::TaskType;
    use serde_json::Value;

    use super::render;
    use crate::cli::OutputFormat;

    fn sample() -> Task {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        Task::new("MDU-1", "Fix login", TaskType::Work, now)
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&sample(), OutputFormat::Json).expect("json render should work");
        let value: Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["id"], "MDU-1");
        assert_eq!(value["type"], "work");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&sample(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let _: Value = serde_json::from_str(&out).expect("valid json");
    }

    #[test]
    fn markdown_render_uses_document_view() {
        let out = render(&sample(), OutputFormat::Markdown).expect("markdown render should work");
        assert!(out.starts_with("# MDU-1: Fix login"));
        assert!(!out.ends_with('\n'));
    }
}
