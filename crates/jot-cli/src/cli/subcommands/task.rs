use clap::Subcommand;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task.
    Create {
        /// Task ID, also the record's file name.
        id: String,
        #[arg(long)]
        title: String,
        /// work, learning, personal, or investigation.
        #[arg(long = "type")]
        task_type: String,
        /// Repeat for several tags.
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        issue_url: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Append an entry to a task's log.
    Entry {
        task_id: String,
        content: String,
        /// RFC 3339 entry time; now when omitted.
        #[arg(long)]
        at: Option<String>,
    },
    /// Replace the content of an existing entry.
    #[command(name = "edit-entry")]
    EditEntry {
        task_id: String,
        entry_id: String,
        content: String,
    },
    /// Change a task's status.
    Status {
        task_id: String,
        /// active, completed, paused, or blocked.
        status: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Get a task by ID.
    Get { task_id: String },
    /// List tasks, most recently updated first.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "type")]
        task_type: Option<String>,
        /// Match tasks carrying any of these tags.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Updated on or after (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,
        /// Updated on or before (YYYY-MM-DD).
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        offset: Option<u32>,
    },
}
