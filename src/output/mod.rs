//! Output formatting for studybreak.
//!
//! This module provides formatters for displaying settings and session
//! transcripts in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StudyError;
use crate::session::{AppreciationPolicy, SessionConfig};

pub use json::*;
pub use pretty::*;

/// Format the duration table based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_durations(
    entries: &[SessionConfig],
    policy: AppreciationPolicy,
    default_minutes: u32,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_durations_pretty(entries, policy, default_minutes)),
        OutputFormat::Json => format_durations_json(entries, policy, default_minutes),
    }
}
