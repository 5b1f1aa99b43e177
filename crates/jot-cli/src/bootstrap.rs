use anyhow::Context;
use jot_config::JotConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, letting `--data-dir` override every source.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<JotConfig> {
    let config = JotConfig::load_with_data_dir(flags.data_dir.as_deref())
        .context("failed to load jot configuration")?;
    tracing::debug!(data_dir = %config.store.data_dir.display(), "configuration loaded");
    Ok(config)
}
