use clap::Subcommand;

/// Activity log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LogCommands {
    /// Entries recorded on one day.
    Daily {
        /// YYYY-MM-DD; today when omitted.
        date: Option<String>,
    },
    /// Seven days of activity.
    Weekly {
        /// YYYY-MM-DD; this week's Monday when omitted.
        week_start: Option<String>,
    },
}
