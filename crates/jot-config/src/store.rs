//! Record store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// `~/.jot`, or `./.jot` when no home directory is known.
fn default_data_dir() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".jot"), |home| home.join(".jot"))
}

const fn default_create_dirs() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Root directory holding `tasks/`, `daily/`, and `one-on-ones/`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Create the layout directories on open when missing.
    #[serde(default = "default_create_dirs")]
    pub create_dirs: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            create_dirs: default_create_dirs(),
        }
    }
}

impl StoreConfig {
    /// Check that a data directory has been resolved.
    pub fn is_configured(&self) -> bool {
        !self.data_dir.as_os_str().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_dot_jot() {
        let config = StoreConfig::default();
        assert!(config.data_dir.ends_with(".jot"));
        assert!(config.create_dirs);
        assert!(config.is_configured());
    }

    #[test]
    fn empty_path_is_not_configured() {
        let config = StoreConfig {
            data_dir: PathBuf::new(),
            create_dirs: false,
        };
        assert!(!config.is_configured());
    }
}
