//! JSON output formatting for studybreak.

use serde::Serialize;
use serde_json::json;

use crate::error::StudyError;
use crate::session::{AppreciationPolicy, SessionConfig};

/// Format the duration table as JSON
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_durations_json(
    entries: &[SessionConfig],
    policy: AppreciationPolicy,
    default_minutes: u32,
) -> Result<String, StudyError> {
    let output = json!({
        "appreciation": policy,
        "default_study_minutes": default_minutes,
        "count": entries.len(),
        "durations": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value to pretty JSON.
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
