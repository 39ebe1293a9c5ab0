//! Audio playback through an external player process.
//!
//! Each channel (study music, break music, cues) runs at most one child
//! process. Pausing kills the child; a subprocess cannot resume mid-file, so
//! resumed study music starts from the top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::AudioConfig;
use crate::error::StudyError;
use crate::session::{AudioPort, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Channel {
    Study,
    Break,
    Cue,
}

impl Channel {
    const fn of(track: Track) -> Self {
        match track {
            Track::Study => Self::Study,
            Track::Break(_) => Self::Break,
            Track::StartCue | Track::EndCue => Self::Cue,
        }
    }
}

#[derive(Debug)]
struct Playing {
    track: Track,
    child: Child,
}

/// Plays files by spawning the configured player command.
#[derive(Debug)]
pub struct CommandAudio {
    program: String,
    args: Vec<String>,
    study_track: PathBuf,
    break_tracks: Vec<PathBuf>,
    start_cue: Option<PathBuf>,
    end_cue: Option<PathBuf>,
    channels: HashMap<Channel, Playing>,
    study_wanted: bool,
}

impl CommandAudio {
    /// Create a player from audio settings.
    ///
    /// Returns `None` when no player command is configured.
    #[must_use]
    pub fn from_config(config: &AudioConfig) -> Option<Self> {
        let (program, args) = config.player.split_first()?;

        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            study_track: config.study_track.clone(),
            break_tracks: config.break_tracks.clone(),
            start_cue: config.start_cue.clone(),
            end_cue: config.end_cue.clone(),
            channels: HashMap::new(),
            study_wanted: false,
        })
    }

    /// Restart looping study music that finished, and reap exited players.
    pub fn maintain(&mut self) {
        let mut finished = Vec::new();
        for (channel, playing) in &mut self.channels {
            if matches!(playing.child.try_wait(), Ok(Some(_))) {
                finished.push(*channel);
            }
        }

        for channel in finished {
            self.channels.remove(&channel);
            if channel == Channel::Study && self.study_wanted {
                trace!("study track looped");
                if let Err(e) = self.spawn(Track::Study) {
                    debug!(error = %e, "study loop restart failed");
                    self.study_wanted = false;
                }
            }
        }
    }

    /// Number of live player processes.
    #[must_use]
    pub fn active_players(&self) -> usize {
        self.channels.len()
    }

    fn path_for(&self, track: Track) -> Result<Option<&Path>, StudyError> {
        match track {
            Track::Study => Ok(Some(self.study_track.as_path())),
            Track::Break(index) => self
                .break_tracks
                .get(index)
                .map(|p| Some(p.as_path()))
                .ok_or_else(|| StudyError::Playback(format!("no break track at index {index}"))),
            Track::StartCue => Ok(self.start_cue.as_deref()),
            Track::EndCue => Ok(self.end_cue.as_deref()),
        }
    }

    fn spawn(&mut self, track: Track) -> Result<(), StudyError> {
        // Cues are optional; an unset cue plays nothing.
        let Some(path) = self.path_for(track)? else {
            return Ok(());
        };

        if !path.exists() {
            return Err(StudyError::Playback(format!(
                "audio file not found: {}",
                path.display()
            )));
        }

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| StudyError::Playback(format!("failed to start {}: {e}", self.program)))?;

        debug!(?track, path = %path.display(), "player started");
        self.channels.insert(Channel::of(track), Playing { track, child });
        Ok(())
    }

    fn stop_channel(&mut self, channel: Channel) {
        if let Some(mut playing) = self.channels.remove(&channel) {
            // The process may already have exited.
            let _ = playing.child.kill();
            let _ = playing.child.wait();
        }
    }
}

impl AudioPort for CommandAudio {
    fn play(&mut self, track: Track) -> Result<(), StudyError> {
        let channel = Channel::of(track);

        if let Some(playing) = self.channels.get_mut(&channel) {
            let alive = matches!(playing.child.try_wait(), Ok(None));
            if alive && playing.track == track {
                return Ok(());
            }
        }

        self.stop_channel(channel);
        if track == Track::Study {
            self.study_wanted = true;
        }
        self.spawn(track)
    }

    fn pause(&mut self, track: Track) {
        let channel = Channel::of(track);
        if track == Track::Study {
            self.study_wanted = false;
        }
        if self.channels.get(&channel).is_some_and(|p| p.track == track) {
            self.stop_channel(channel);
        }
    }

    fn seek(&mut self, track: Track, position: Duration) {
        // Only rewinding is supported: drop the player so the next play starts over.
        if position.is_zero() && self.channels.get(&Channel::of(track)).is_some_and(|p| p.track == track) {
            self.stop_channel(Channel::of(track));
        }
    }
}

impl Drop for CommandAudio {
    fn drop(&mut self) {
        for channel in [Channel::Study, Channel::Break, Channel::Cue] {
            self.stop_channel(channel);
        }
    }
}
