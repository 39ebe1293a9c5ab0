//! Command implementations for studybreak.
//!
//! Each command returns the text to print; `main` does the printing.

mod completions;
mod config;
mod durations;
mod simulate;

pub use completions::completions;
pub use config::config;
pub use durations::durations;
pub use simulate::{run_simulation, simulate, SimulationReport, SimulationStep};

use std::path::{Path, PathBuf};

use crate::config::{Config, Paths};
use crate::error::StudyError;

/// Resolve the config file path: an explicit path wins over `~/.studybreak/`.
///
/// # Errors
///
/// Returns an error if no path was given and the home directory is unknown.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, StudyError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Paths::new()?.config_file),
    }
}

/// Load settings from `explicit` or the default location.
///
/// A missing file yields the built-in defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, StudyError> {
    Config::load_from_path(&config_path(explicit)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = config_path(Some(Path::new("custom.yaml"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.yaml"));
    }

    #[test]
    fn test_missing_explicit_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_config(Some(&dir.path().join("none.yaml"))).unwrap();
        assert_eq!(config.timer.default_study_minutes, 25);
    }
}
