//! Recording test doubles for the controller ports.

use std::time::Duration;

use crate::error::StudyError;
use crate::session::ports::{AudioPort, Track};

/// One call received by [`RecordingAudio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCall {
    Play(Track),
    Pause(Track),
    Seek(Track, Duration),
}

/// Audio port that records every call.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
    refuse: bool,
}

impl RecordingAudio {
    /// A backend that refuses every `play`, like a browser without autoplay permission.
    pub fn refusing() -> Self {
        Self {
            calls: Vec::new(),
            refuse: true,
        }
    }

    /// Tracks passed to `play`, in order.
    pub fn played(&self) -> Vec<Track> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AudioCall::Play(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// Break tracks passed to `play`, in order.
    pub fn played_break_tracks(&self) -> Vec<usize> {
        self.played()
            .into_iter()
            .filter_map(|t| match t {
                Track::Break(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    /// Whether `pause` was called for this track.
    pub fn paused(&self, track: Track) -> bool {
        self.calls.contains(&AudioCall::Pause(track))
    }
}

impl AudioPort for RecordingAudio {
    fn play(&mut self, track: Track) -> Result<(), StudyError> {
        self.calls.push(AudioCall::Play(track));
        if self.refuse {
            return Err(StudyError::Playback("user interaction required".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self, track: Track) {
        self.calls.push(AudioCall::Pause(track));
    }

    fn seek(&mut self, track: Track, position: Duration) {
        self.calls.push(AudioCall::Seek(track, position));
    }
}
