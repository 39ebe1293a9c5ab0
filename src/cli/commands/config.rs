//! Config command implementation.

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use tracing::info;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::StudyError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// `path` is the config file the command reads or writes.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, the settings are
/// invalid, or output formatting fails.
pub fn config(
    cmd: &ConfigCommands,
    path: &Path,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        ConfigCommands::Show => show(path, format),
        ConfigCommands::Validate => validate(path, format),
        ConfigCommands::Init { force } => init(path, *force, format),
        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&json!({ "path": path })),
            OutputFormat::Pretty => Ok(path.display().to_string()),
        },
    }
}

fn show(path: &Path, format: OutputFormat) -> Result<String, StudyError> {
    let settings = Config::load_from_path(path)?;

    match format {
        OutputFormat::Json => to_json(&settings),
        OutputFormat::Pretty => {
            let yaml = serde_yaml::to_string(&settings).map_err(|e| {
                StudyError::Configuration(format!("Failed to serialize config: {e}"))
            })?;
            let source = if path.exists() {
                path.display().to_string()
            } else {
                "built-in defaults".to_string()
            };
            Ok(format!("{} {}\n{}", "#".dimmed(), source.dimmed(), yaml.trim_end()))
        }
    }
}

fn validate(path: &Path, format: OutputFormat) -> Result<String, StudyError> {
    let settings = Config::load_from_path(path)?;
    let table = settings.validate()?;
    let count = table.entries().len();

    match format {
        OutputFormat::Json => to_json(&json!({
            "valid": true,
            "path": path,
            "durations": count,
            "default_study_minutes": settings.timer.default_study_minutes,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {} ({count} durations, default {} min)",
            "✓".green(),
            path.display(),
            settings.timer.default_study_minutes
        )),
    }
}

fn init(path: &Path, force: bool, format: OutputFormat) -> Result<String, StudyError> {
    if path.exists() && !force {
        return Err(StudyError::Configuration(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Config::default().save_to_path(path)?;
    info!(path = %path.display(), "wrote default config");

    match format {
        OutputFormat::Json => to_json(&json!({ "created": path })),
        OutputFormat::Pretty => Ok(format!("Wrote default config to {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_validate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        config(&ConfigCommands::Init { force: false }, &path, OutputFormat::Pretty).unwrap();
        assert!(path.exists());

        let out = config(&ConfigCommands::Validate, &path, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["valid"], true);
        assert_eq!(parsed["durations"], 3);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "timer: {}\n").unwrap();

        let err = config(&ConfigCommands::Init { force: false }, &path, OutputFormat::Pretty)
            .unwrap_err();
        assert!(err.to_string().contains("--force"));

        config(&ConfigCommands::Init { force: true }, &path, OutputFormat::Pretty).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.timer.default_study_minutes, 25);
    }

    #[test]
    fn test_validate_reports_bad_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "timer:\n  default_study_minutes: 30\n").unwrap();

        let err = config(&ConfigCommands::Validate, &path, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, StudyError::Configuration(_)));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_show_missing_file_uses_defaults() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");

        let out = config(&ConfigCommands::Show, &path, OutputFormat::Pretty).unwrap();
        assert!(out.starts_with("# built-in defaults"));
        assert!(out.contains("default_study_minutes: 25"));
    }

    #[test]
    fn test_path_prints_location() {
        let path = Path::new("/tmp/sb/config.yaml");
        let out = config(&ConfigCommands::Path, path, OutputFormat::Pretty).unwrap();
        assert_eq!(out, "/tmp/sb/config.yaml");
    }
}
