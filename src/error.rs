//! Error types for studybreak.

use thiserror::Error;

/// Errors that can occur in studybreak.
#[derive(Error, Debug)]
pub enum StudyError {
    /// A study duration has no mapping entry, or the settings are invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The audio backend refused to start a track.
    #[error("Playback error: {0}")]
    Playback(String),

    /// Terminal setup, drawing or event handling failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StudyError {
    /// Whether this error belongs to the best-effort audio side.
    #[must_use]
    pub const fn is_playback(&self) -> bool {
        matches!(self, Self::Playback(_))
    }

    /// Exit code used by the binary for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::Playback(_) | Self::Terminal(_) | Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = StudyError::Configuration("no mapping for 30 minutes".to_string());
        assert_eq!(err.to_string(), "Configuration error: no mapping for 30 minutes");

        let err = StudyError::Playback("autoplay refused".to_string());
        assert_eq!(err.to_string(), "Playback error: autoplay refused");
    }

    #[test]
    fn test_is_playback() {
        assert!(StudyError::Playback(String::new()).is_playback());
        assert!(!StudyError::Configuration(String::new()).is_playback());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(StudyError::Configuration(String::new()).exit_code(), 2);
        assert_eq!(StudyError::Terminal(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StudyError = io.into();
        assert!(matches!(err, StudyError::Io(_)));
    }
}
