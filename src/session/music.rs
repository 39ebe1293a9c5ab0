//! Phase music sequencing.
//!
//! Study phases loop a single track. Break phases walk a playlist in order,
//! wrapping at the end, one track per break entry or manual skip.

use std::time::Duration;

use tracing::debug;

use crate::session::ports::{AudioPort, Track};
use crate::session::state::Phase;

/// Chooses and drives the music for the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicSequencer {
    enabled: bool,
    playlist_len: usize,
    current_break_track: Option<usize>,
    cursor: usize,
}

impl MusicSequencer {
    /// Create a sequencer for a break playlist of `playlist_len` tracks.
    #[must_use]
    pub const fn new(enabled: bool, playlist_len: usize) -> Self {
        Self {
            enabled,
            playlist_len,
            current_break_track: None,
            cursor: 0,
        }
    }

    /// Whether music is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Break track loaded during the current break, if any.
    #[must_use]
    pub const fn current_break_track(&self) -> Option<usize> {
        self.current_break_track
    }

    /// Flip the enabled flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Forget the loaded break track; the next break picks up from the cursor.
    pub fn begin_break(&mut self) {
        self.current_break_track = None;
    }

    /// Return to the start of the playlist.
    pub fn reset(&mut self) {
        self.current_break_track = None;
        self.cursor = 0;
    }

    /// Start the music that belongs to `phase`, if enabled.
    pub fn play_for<A: AudioPort>(&mut self, phase: Phase, audio: &mut A) {
        if !self.enabled {
            return;
        }

        match phase {
            Phase::Studying => {
                if let Some(index) = self.current_break_track {
                    audio.pause(Track::Break(index));
                }
                try_play(audio, Track::Study);
            }
            Phase::OnBreak => {
                audio.pause(Track::Study);
                match self.current_break_track {
                    Some(index) => try_play(audio, Track::Break(index)),
                    None => self.advance(audio),
                }
            }
        }
    }

    /// Skip to the following break track. Returns false if nothing changed.
    pub fn next_track<A: AudioPort>(&mut self, audio: &mut A) -> bool {
        if !self.enabled || self.playlist_len == 0 {
            return false;
        }
        self.advance(audio);
        true
    }

    /// Silence both music channels.
    pub fn stop_all<A: AudioPort>(&self, audio: &mut A) {
        audio.pause(Track::Study);
        if let Some(index) = self.current_break_track {
            audio.pause(Track::Break(index));
        }
    }

    fn advance<A: AudioPort>(&mut self, audio: &mut A) {
        if self.playlist_len == 0 {
            return;
        }

        if let Some(previous) = self.current_break_track {
            audio.pause(Track::Break(previous));
        }

        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.playlist_len;
        self.current_break_track = Some(index);
        debug!(track = index, "break track selected");

        audio.seek(Track::Break(index), Duration::ZERO);
        try_play(audio, Track::Break(index));
    }
}

/// Best-effort playback: failures are logged and dropped.
pub(crate) fn try_play<A: AudioPort>(audio: &mut A, track: Track) {
    if let Err(e) = audio.play(track) {
        debug!(?track, error = %e, "playback refused");
    }
}
