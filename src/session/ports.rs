//! Collaborator interfaces the controller drives.
//!
//! The presentation layer implements [`Presenter`] and the audio backend
//! implements [`AudioPort`]. Neither gets a handle back to the controller.

use std::time::Duration;

use serde::Serialize;

use crate::error::StudyError;
use crate::session::state::{Interstitial, Phase};
use crate::session::table::SessionConfig;

/// Audio identified by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    /// Looping study music.
    Study,
    /// Entry in the break playlist.
    Break(usize),
    /// Played when the countdown starts.
    StartCue,
    /// Played when the countdown reaches zero.
    EndCue,
}

/// Audio playback backend.
#[cfg_attr(test, mockall::automock)]
pub trait AudioPort {
    /// Start or resume a track from its current position.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Playback` if the backend refuses to play.
    fn play(&mut self, track: Track) -> Result<(), StudyError>;

    /// Pause a track, keeping its position.
    fn pause(&mut self, track: Track);

    /// Move a track's playback position.
    fn seek(&mut self, track: Track, position: Duration);
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SessionEvent {
    /// Countdown display changed.
    Tick {
        remaining_seconds: u32,
        session_count: u32,
    },
    /// A new phase began.
    PhaseChanged { phase: Phase },
    /// Music was switched on or off.
    MusicStateChanged { enabled: bool },
    /// A blocking prompt appeared.
    InterstitialShown {
        kind: Interstitial,
        message: String,
    },
    /// The prompt was dismissed.
    InterstitialHidden,
    /// A new study duration was selected.
    DurationChanged { config: SessionConfig },
}

/// Presentation layer sink.
pub trait Presenter {
    /// Refresh the view after a state change.
    fn notify(&mut self, event: SessionEvent);
}

impl Presenter for Vec<SessionEvent> {
    fn notify(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_presenter_records() {
        let mut seen: Vec<SessionEvent> = Vec::new();
        seen.notify(SessionEvent::InterstitialHidden);
        assert_eq!(seen, vec![SessionEvent::InterstitialHidden]);
    }

    #[test]
    fn test_event_json_shape() {
        let event = SessionEvent::Tick {
            remaining_seconds: 59,
            session_count: 2,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "tick");
        assert_eq!(json["remaining_seconds"], 59);
    }
}
