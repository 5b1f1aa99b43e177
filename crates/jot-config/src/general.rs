//! General application configuration.

use jot_core::enums::{TaskType, parse_choice};
use jot_core::requests::RequestDefaults;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default page size for `task list`.
const fn default_limit() -> u32 {
    50
}

/// Hard cap on page size.
const fn default_max_limit() -> u32 {
    200
}

const fn default_history_limit() -> u32 {
    10
}

fn default_import_prefix() -> String {
    "IMPORT".to_string()
}

fn default_import_type() -> String {
    "personal".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Upper bound applied to any requested limit.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,

    /// Task ID prefix for imported tasks.
    #[serde(default = "default_import_prefix")]
    pub default_import_prefix: String,

    /// Task type assigned to imported tasks.
    #[serde(default = "default_import_type")]
    pub default_import_type: String,

    /// Number of meetings shown by `meeting history`.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            default_import_prefix: default_import_prefix(),
            default_import_type: default_import_type(),
            history_limit: default_history_limit(),
        }
    }
}

impl GeneralConfig {
    /// Check limits and the import type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: format!("{} exceeds max_limit {}", self.default_limit, self.max_limit),
            });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.history_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.default_import_prefix.trim().is_empty()
            || self.default_import_prefix.contains(['/', '\\'])
        {
            return Err(ConfigError::InvalidValue {
                field: "general.default_import_prefix".into(),
                reason: "must be a non-empty file-name-safe string".into(),
            });
        }
        self.import_type().map(|_| ())
    }

    fn import_type(&self) -> Result<TaskType, ConfigError> {
        parse_choice::<TaskType>(&self.default_import_type, "default_import_type").map_err(|e| {
            ConfigError::InvalidValue {
                field: "general.default_import_type".into(),
                reason: e.to_string(),
            }
        })
    }

    /// Defaults handed to argument validation.
    pub fn request_defaults(&self) -> Result<RequestDefaults, ConfigError> {
        self.validate()?;
        Ok(RequestDefaults {
            list_limit: self.default_limit as usize,
            max_list_limit: self.max_limit as usize,
            history_limit: self.history_limit as usize,
            import_prefix: self.default_import_prefix.trim().to_string(),
            import_type: self.import_type()?,
        })
    }
}
