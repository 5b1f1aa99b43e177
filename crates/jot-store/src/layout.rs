//! On-disk layout of the data root.
//!
//! ```text
//! <root>/tasks/<task id>.json
//! <root>/daily/<YYYY-MM-DD>.json
//! <root>/one-on-ones/<YYYY-MM-DD>.json
//! ```

use std::path::{Path, PathBuf};

pub const TASKS_DIR: &str = "tasks";
pub const DAILY_DIR: &str = "daily";
pub const ONE_ON_ONES_DIR: &str = "one-on-ones";

const EXT: &str = "json";

/// Resolves record paths under one data root.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The three record directories.
    #[must_use]
    pub fn dirs(&self) -> [PathBuf; 3] {
        [
            self.root.join(TASKS_DIR),
            self.root.join(DAILY_DIR),
            self.root.join(ONE_ON_ONES_DIR),
        ]
    }

    #[must_use]
    pub fn tasks_dir(&self) -> PathBuf {
        self.root.join(TASKS_DIR)
    }

    #[must_use]
    pub fn one_on_ones_dir(&self) -> PathBuf {
        self.root.join(ONE_ON_ONES_DIR)
    }

    #[must_use]
    pub fn task_path(&self, id: &str) -> PathBuf {
        self.tasks_dir().join(format!("{id}.{EXT}"))
    }

    #[must_use]
    pub fn daily_path(&self, date: &str) -> PathBuf {
        self.root.join(DAILY_DIR).join(format!("{date}.{EXT}"))
    }

    #[must_use]
    pub fn one_on_one_path(&self, date: &str) -> PathBuf {
        self.one_on_ones_dir().join(format!("{date}.{EXT}"))
    }

    /// `path` relative to the root, `/`-separated, for messages.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether `path` is a record file (`*.json`).
    #[must_use]
    pub fn is_record(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(EXT)
    }
}
