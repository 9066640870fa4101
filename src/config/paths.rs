//! Path resolution for mindwell configuration and data files.
//!
//! Everything lives in `~/.mindwell/`, or in `$MINDWELL_HOME` when set:
//! - `config.yaml` - Main configuration file
//! - `mindwell.db` - SQLite database for progress, practice history and moods
//! - `catalog.yaml` - Optional custom exercise catalog
//! - `mindwell.log` - Log output

use std::path::PathBuf;

use crate::error::MindwellError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "MINDWELL_HOME";

/// Paths to mindwell configuration and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.mindwell/`
    pub root: PathBuf,
    /// Config file: `~/.mindwell/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.mindwell/mindwell.db`
    pub database: PathBuf,
    /// Catalog override: `~/.mindwell/catalog.yaml`
    pub catalog: PathBuf,
    /// Log file: `~/.mindwell/mindwell.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$MINDWELL_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, MindwellError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            MindwellError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".mindwell")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("mindwell.db"),
            catalog: root.join("catalog.yaml"),
            log_file: root.join("mindwell.log"),
            root,
        }
    }

    /// Create the root directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), MindwellError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                MindwellError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-mindwell");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("mindwell.db"));
        assert_eq!(paths.catalog, root.join("catalog.yaml"));
        assert_eq!(paths.log_file, root.join("mindwell.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("home"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op.
        paths.ensure_dirs().unwrap();
    }
}
