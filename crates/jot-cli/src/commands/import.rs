use jot_core::requests;
use jot_import::import_data;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::commands::shared::input::read_payload;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jot import`.
pub async fn handle(args: ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let content = read_payload(args.file.as_deref())?;
    let req = requests::ImportArgs {
        content: Some(content),
        format: Some(args.input_format),
        task_prefix: args.prefix,
        default_type: args.default_type,
    }
    .validate(ctx.service.defaults())?;
    let result = import_data(&ctx.service, &req).await?;
    output(&result, flags.format)
}
