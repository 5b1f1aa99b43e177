use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Task { action } => commands::task::handle(action, ctx, flags).await,
        Commands::Log { action } => commands::log::handle(action, ctx, flags).await,
        Commands::Meeting { action } => commands::meeting::handle(action, ctx, flags).await,
        Commands::Search(args) => commands::search::handle(args, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(args, ctx, flags).await,
        Commands::Recommend(args) => commands::recommend::handle(args, ctx, flags).await,
        Commands::Analytics(args) => commands::analytics::handle(args, ctx, flags).await,
    }
}
