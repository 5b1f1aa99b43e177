use clap::Subcommand;

/// One-on-one meeting commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MeetingCommands {
    /// Record a meeting, replacing any earlier record for the date.
    Create {
        /// YYYY-MM-DD
        date: String,
        #[arg(long = "insight")]
        insights: Vec<String>,
        #[arg(long = "todo")]
        todos: Vec<String>,
        #[arg(long)]
        feedback: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Most recent meetings first.
    History,
}
