//! Durations command implementation.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::StudyError;
use crate::output::format_durations;

/// Execute the durations command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or output formatting fails.
pub fn durations(config: &Config, format: OutputFormat) -> Result<String, StudyError> {
    let table = config.validate()?;
    format_durations(
        &table.entries(),
        table.policy(),
        config.timer.default_study_minutes,
        format,
    )
}
