//! Path resolution for studybreak configuration and log files.
//!
//! All studybreak data is stored in `~/.studybreak/`:
//! - `config.yaml` - Timer, audio and message settings
//! - `studybreak.log` - Log output (the TUI owns the terminal)

use std::path::PathBuf;

use crate::error::StudyError;

/// Paths to studybreak configuration and log files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.studybreak/`
    pub root: PathBuf,
    /// Config file: `~/.studybreak/config.yaml`
    pub config_file: PathBuf,
    /// Log file: `~/.studybreak/studybreak.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StudyError> {
        let home = std::env::var("HOME").map_err(|_| {
            StudyError::Configuration("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".studybreak")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            log_file: root.join("studybreak.log"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StudyError::Configuration(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".studybreak"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-studybreak");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.log_file, root.join("studybreak.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join(".studybreak"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
    }
}
