use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use jot_core::enums::ExportFormat;
use jot_core::markdown::Markdown;
use jot_core::requests;
use jot_core::responses::ExportOutput;
use jot_import::export_data;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

/// What was written when the export went to a file.
#[derive(Debug, Serialize)]
struct ExportSummary {
    format: ExportFormat,
    path: PathBuf,
    tasks: usize,
    entries: usize,
    one_on_ones: usize,
    exported_at: DateTime<Utc>,
}

impl ExportSummary {
    fn new(export: &ExportOutput, path: PathBuf) -> Self {
        Self {
            format: export.format,
            path,
            tasks: export.tasks,
            entries: export.entries,
            one_on_ones: export.one_on_ones,
            exported_at: export.exported_at,
        }
    }
}

impl Markdown for ExportSummary {
    fn to_markdown(&self) -> String {
        format!(
            "Exported {} task(s), {} entries, and {} one-on-one(s) as {} to {}\n",
            self.tasks,
            self.entries,
            self.one_on_ones,
            self.format,
            self.path.display()
        )
    }
}

/// Handle `jot export`.
///
/// Without `--output` the document itself goes to stdout, whatever `--format`
/// says; `--format` only shapes the summary printed after writing a file.
pub async fn handle(args: ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let req = requests::ExportArgs {
        format: Some(args.document_format),
        date_from: args.from,
        date_to: args.to,
        task_filter: args.task_type,
    }
    .validate()?;
    let export = export_data(&ctx.service, &req).await?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &export.content)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            output(&ExportSummary::new(&export, path), flags.format)
        }
        None => {
            print!("{}", export.content);
            if !export.content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use jot_core::enums::ExportFormat;
    use jot_core::markdown::Markdown;
    use jot_core::responses::ExportOutput;
    use pretty_assertions::assert_eq;

    use super::ExportSummary;

    #[test]
    fn summary_drops_document_body() {
        let export = ExportOutput {
            format: ExportFormat::Csv,
            tasks: 2,
            entries: 5,
            one_on_ones: 1,
            exported_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            content: "Type,Date,Time\n".into(),
        };
        let summary = ExportSummary::new(&export, "journal.csv".into());
        let json = serde_json::to_value(&summary).expect("serializes");
        assert!(json.get("content").is_none());
        assert_eq!(json["path"], "journal.csv");
        assert_eq!(
            summary.to_markdown(),
            "Exported 2 task(s), 5 entries, and 1 one-on-one(s) as csv to journal.csv\n"
        );
    }
}
