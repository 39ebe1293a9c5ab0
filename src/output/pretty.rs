//! Human-readable output formatting for studybreak.

use colored::Colorize;

use crate::session::{AppreciationPolicy, SessionConfig};

/// Format the duration table for the terminal.
#[must_use]
pub fn format_durations_pretty(
    entries: &[SessionConfig],
    policy: AppreciationPolicy,
    default_minutes: u32,
) -> String {
    let mut lines = vec![
        "Study durations".bold().to_string(),
        "─".repeat(40),
        format!("{:>3}  {:>8}  {:>8}  {}", "#", "study", "break", "appreciation"),
    ];

    for (i, entry) in entries.iter().enumerate() {
        let appreciation = match (policy, entry.appreciation_interval) {
            (AppreciationPolicy::Disabled, _) | (_, 0) => "never".to_string(),
            (AppreciationPolicy::CountBased, 1) => "every session".to_string(),
            (AppreciationPolicy::CountBased, n) => format!("every {n} sessions"),
        };

        let line = format!(
            "{:>3}  {:>4} min  {:>4} min  {}",
            i + 1,
            entry.study_minutes,
            entry.break_minutes,
            appreciation
        );

        if entry.study_minutes == default_minutes {
            lines.push(format!("{} {}", line.green(), "(default)".dimmed()));
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format seconds as H:MM:SS.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
