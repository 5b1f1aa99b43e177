use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{LogCommands, MeetingCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Tasks and their entry logs.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Daily and weekly activity logs.
    Log {
        #[command(subcommand)]
        action: LogCommands,
    },
    /// One-on-one meeting records.
    Meeting {
        #[command(subcommand)]
        action: MeetingCommands,
    },
    /// Full-text search over entries and meetings.
    Search(SearchArgs),
    /// Import tasks from a file or stdin.
    Import(ImportArgs),
    /// Export the journal.
    Export(ExportArgs),
    /// Rule-based suggestions for what to do next.
    Recommend(RecommendArgs),
    /// Task metrics, trends, and insights.
    Analytics(AnalyticsArgs),
}

/// Arguments for `jot search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive).
    pub query: String,
    /// Restrict task entries to one task type.
    #[arg(long = "type")]
    pub task_type: Option<String>,
    /// Earliest date to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,
    /// Latest date to include (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for `jot import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Payload format: txt, markdown, json, csv.
    #[arg(value_name = "FORMAT")]
    pub input_format: String,
    /// File to read; stdin when omitted or `-`.
    pub file: Option<PathBuf>,
    /// Prefix for generated task IDs.
    #[arg(long)]
    pub prefix: Option<String>,
    /// Task type for imported tasks without one.
    #[arg(long = "type")]
    pub default_type: Option<String>,
}

/// Arguments for `jot export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Document format: json, markdown, csv.
    #[arg(value_name = "FORMAT")]
    pub document_format: String,
    /// Earliest date to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,
    /// Latest date to include (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,
    /// Only export tasks of this type.
    #[arg(long = "type")]
    pub task_type: Option<String>,
    /// Write the document here and print a summary instead.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `jot recommend`.
#[derive(Clone, Debug, Args)]
pub struct RecommendArgs {
    /// productivity, learning, completion, or priority.
    #[arg(long)]
    pub focus: Option<String>,
    /// Only consider tasks of this type.
    #[arg(long = "type")]
    pub task_type: Option<String>,
}

/// Arguments for `jot analytics`.
#[derive(Clone, Debug, Args)]
pub struct AnalyticsArgs {
    /// overview, productivity, patterns, or trends.
    #[arg(long)]
    pub report: Option<String>,
    /// week, month, quarter, year, or all.
    #[arg(long)]
    pub period: Option<String>,
    /// Only consider tasks of this type.
    #[arg(long = "type")]
    pub task_type: Option<String>,
}
