//! # jot-config
//!
//! Layered configuration loading for Jot using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`JOT_*` prefix, `__` as separator)
//! 2. Project-level `.jot/config.toml`
//! 3. User-level `~/.config/jot/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `JOT_STORE__DATA_DIR` -> `store.data_dir`,
//! `JOT_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use jot_config::JotConfig;
//!
//! let config = JotConfig::load_with_dotenv().expect("config");
//! println!("journal lives in {}", config.store.data_dir.display());
//! ```

mod error;
mod general;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "JOT_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JotConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl JotConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading. The result is validated before it is returned.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// [`Self::load_with_dotenv`] with a data directory that outranks every
    /// other source (the CLI's `--data-dir`).
    pub fn load_with_data_dir(data_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let mut figment = Self::figment();
        if let Some(dir) = data_dir {
            figment = figment.merge(Serialized::default("store.data_dir", dir));
        }
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".jot/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.store.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "store".into(),
            });
        }
        self.general.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jot").join("config.toml"))
    }
}
