use jot_core::enums::{TaskType, parse_choice};

use super::{BatchBuilder, ImportAdapter, ImportContext, ParsedBatch};
use crate::error::ImportError;
use crate::timestamp;

const TITLE_COLUMNS: &[&str] = &["title", "task", "name", "task_title"];
const DATE_COLUMNS: &[&str] = &["date", "timestamp"];
const TIME_COLUMNS: &[&str] = &["time"];
const CONTENT_COLUMNS: &[&str] = &["content", "description", "notes", "entry"];
const PRIORITY_COLUMNS: &[&str] = &["priority"];
const TYPE_COLUMNS: &[&str] = &["type", "task_type"];

/// CSV with a header row. Rows are grouped into tasks by title.
pub struct CsvAdapter;

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct Columns {
    title: Option<usize>,
    date: Option<usize>,
    time: Option<usize>,
    content: usize,
    priority: Option<usize>,
    task_type: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, ImportError> {
        let find = |names: &[&str]| {
            header
                .iter()
                .position(|h| names.contains(&h.trim().to_ascii_lowercase().as_str()))
        };
        let content = find(CONTENT_COLUMNS).ok_or_else(|| ImportError::MissingColumn {
            role: "content".into(),
            accepted: CONTENT_COLUMNS.join(", "),
        })?;
        // A lone `time` column carries the full timestamp.
        let (date, time) = match (find(DATE_COLUMNS), find(TIME_COLUMNS)) {
            (None, time) => (time, None),
            both => both,
        };
        Ok(Self {
            title: find(TITLE_COLUMNS),
            date,
            time,
            content,
            priority: find(PRIORITY_COLUMNS),
            task_type: find(TYPE_COLUMNS),
        })
    }
}

fn cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

impl ImportAdapter for CsvAdapter {
    fn parse(&self, content: &str, ctx: &ImportContext) -> Result<ParsedBatch, ImportError> {
        let mut records = split_records(content).into_iter();
        let Some(header) = records.next() else {
            return Err(ImportError::MissingColumn {
                role: "content".into(),
                accepted: CONTENT_COLUMNS.join(", "),
            });
        };
        let columns = Columns::from_header(&header)?;
        let mut builder = BatchBuilder::new(ctx);
        let mut warnings = Vec::new();

        for (n, row) in records.enumerate() {
            let row_no = n + 1;
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            let Some(text) = cell(&row, Some(columns.content)) else {
                warnings.push(format!("Row {row_no}: missing content, skipped"));
                continue;
            };

            let title = cell(&row, columns.title).unwrap_or("Imported CSV data");
            let segment = columns.title.is_none().then_some("csv-data");
            let idx = builder.task_index(title, segment);

            let timestamp = match cell(&row, columns.date) {
                Some(date) => {
                    let stamped = cell(&row, columns.time)
                        .and_then(|time| timestamp::parse_exact(&format!("{date} {time}")));
                    match stamped.or_else(|| timestamp::parse_exact(date)) {
                        Some(ts) => ts,
                        None => {
                            warnings.push(format!(
                                "Row {row_no}: unrecognized date '{date}', using current time"
                            ));
                            ctx.now
                        }
                    }
                }
                None => ctx.now,
            };
            builder.push_entry(idx, timestamp, text);

            let task = builder.task_mut(idx);
            if task.priority.is_none() {
                task.priority = cell(&row, columns.priority).map(String::from);
            }
            if let Some(task_type) = cell(&row, columns.task_type)
                .and_then(|t| parse_choice::<TaskType>(t, "type").ok())
            {
                task.task_type = task_type;
            }
        }

        let (tasks, _) = builder.finish();
        Ok(ParsedBatch { tasks, warnings })
    }
}

/// Split CSV text into records of fields.
///
/// Double-quoted fields may contain commas, newlines, and `""` escapes.
/// Carriage returns outside quotes are dropped.
fn split_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            '\r' => {}
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}
