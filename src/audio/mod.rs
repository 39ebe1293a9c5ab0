//! Audio backends for the session controller.
//!
//! - [`SilentAudio`] accepts every call and plays nothing
//! - [`CommandAudio`] spawns an external player per channel

mod command;

pub use command::CommandAudio;

use std::time::Duration;

use tracing::trace;

use crate::config::AudioConfig;
use crate::error::StudyError;
use crate::session::{AudioPort, Track};

/// Backend that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPort for SilentAudio {
    fn play(&mut self, track: Track) -> Result<(), StudyError> {
        trace!(?track, "silent play");
        Ok(())
    }

    fn pause(&mut self, track: Track) {
        trace!(?track, "silent pause");
    }

    fn seek(&mut self, _track: Track, _position: Duration) {}
}

/// Backend chosen from the audio settings.
#[derive(Debug)]
pub enum AudioBackend {
    /// No player configured.
    Silent(SilentAudio),
    /// External player process.
    Command(CommandAudio),
}

impl AudioBackend {
    /// Pick the external player if one is configured, otherwise stay silent.
    #[must_use]
    pub fn from_config(config: &AudioConfig) -> Self {
        CommandAudio::from_config(config).map_or(Self::Silent(SilentAudio), Self::Command)
    }

    /// Periodic housekeeping; call once per event loop iteration.
    pub fn maintain(&mut self) {
        if let Self::Command(audio) = self {
            audio.maintain();
        }
    }

    /// Short description for the status bar.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Silent(_) => "silent",
            Self::Command(_) => "player",
        }
    }
}

impl AudioPort for AudioBackend {
    fn play(&mut self, track: Track) -> Result<(), StudyError> {
        match self {
            Self::Silent(audio) => audio.play(track),
            Self::Command(audio) => audio.play(track),
        }
    }

    fn pause(&mut self, track: Track) {
        match self {
            Self::Silent(audio) => audio.pause(track),
            Self::Command(audio) => audio.pause(track),
        }
    }

    fn seek(&mut self, track: Track, position: Duration) {
        match self {
            Self::Silent(audio) => audio.seek(track, position),
            Self::Command(audio) => audio.seek(track, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_accepts_everything() {
        let mut audio = SilentAudio;
        assert!(audio.play(Track::Study).is_ok());
        assert!(audio.play(Track::Break(99)).is_ok());
        audio.pause(Track::Study);
        audio.seek(Track::EndCue, Duration::ZERO);
    }

    #[test]
    fn test_backend_selection() {
        let mut config = AudioConfig::default();
        assert!(matches!(AudioBackend::from_config(&config), AudioBackend::Command(_)));

        config.player.clear();
        let backend = AudioBackend::from_config(&config);
        assert!(matches!(backend, AudioBackend::Silent(_)));
        assert_eq!(backend.describe(), "silent");
    }
}
