//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish and
//! PowerShell.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::StudyError;

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns `StudyError::Terminal` if the generated script is not UTF-8.
pub fn completions(shell: Shell) -> Result<String, StudyError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "studybreak", &mut buf);
    String::from_utf8(buf).map_err(|e| StudyError::Terminal(format!("UTF-8 error: {e}")))
}
