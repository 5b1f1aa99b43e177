use jot_config::JotConfig;
use jot_store::service::JournalService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: JournalService,
}

impl AppContext {
    /// Open the store named by the configuration.
    pub async fn init(config: &JotConfig) -> anyhow::Result<Self> {
        let service = JournalService::open(config).await?;
        Ok(Self { service })
    }
}
