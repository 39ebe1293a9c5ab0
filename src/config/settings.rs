//! Configuration settings for studybreak.
//!
//! Settings are loaded from `~/.studybreak/config.yaml`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::StudyError;
use crate::session::{AppreciationPolicy, DurationTable};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Study/break timer settings.
    pub timer: TimerConfig,
    /// Music and sound cue settings.
    pub audio: AudioConfig,
    /// Interstitial message settings.
    pub messages: MessagesConfig,
}

/// Study/break timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Study duration selected at startup.
    #[serde(default = "default_study_minutes")]
    pub default_study_minutes: u32,
    /// Break minutes for each selectable study duration.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: BTreeMap<u32, u32>,
    /// Study sessions between appreciation interstitials, per study duration.
    ///
    /// A value of 0 means the interstitial never fires for that duration.
    #[serde(default = "default_appreciation_intervals")]
    pub appreciation_intervals: BTreeMap<u32, u32>,
    /// Whether study completion may be interrupted by an appreciation card.
    #[serde(default)]
    pub appreciation: AppreciationPolicy,
}

/// Music and sound cue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AudioConfig {
    /// Whether music is enabled at startup.
    #[serde(default = "default_true")]
    pub music_enabled: bool,
    /// External player command; the file path is appended. Empty means silent.
    #[serde(default = "default_player")]
    pub player: Vec<String>,
    /// Looping study track.
    #[serde(default = "default_study_track")]
    pub study_track: PathBuf,
    /// Sequential break playlist.
    #[serde(default = "default_break_tracks")]
    pub break_tracks: Vec<PathBuf>,
    /// Cue played whenever the countdown starts.
    #[serde(default)]
    pub start_cue: Option<PathBuf>,
    /// Cue played when the countdown reaches zero.
    #[serde(default)]
    pub end_cue: Option<PathBuf>,
}

/// Interstitial message settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MessagesConfig {
    /// Pool for the "great work" card, picked uniformly at random.
    #[serde(default = "default_motivation")]
    pub motivation: Vec<String>,
}

// Default value functions for serde
const fn default_study_minutes() -> u32 {
    25
}

fn default_break_minutes() -> BTreeMap<u32, u32> {
    BTreeMap::from([(25, 5), (45, 10), (60, 20)])
}

fn default_appreciation_intervals() -> BTreeMap<u32, u32> {
    BTreeMap::from([(25, 3), (45, 2), (60, 1)])
}

const fn default_true() -> bool {
    true
}

fn default_player() -> Vec<String> {
    vec![
        "mpv".to_string(),
        "--no-video".to_string(),
        "--really-quiet".to_string(),
    ]
}

fn default_study_track() -> PathBuf {
    PathBuf::from("music/study.mp3")
}

fn default_break_tracks() -> Vec<PathBuf> {
    (1..=5)
        .map(|i| PathBuf::from(format!("music/break/{i:02}.mp3")))
        .collect()
}

fn default_motivation() -> Vec<String> {
    [
        "You stayed focused when it mattered.",
        "Consistency quietly builds rank.",
        "This session counts.",
        "Discipline creates results.",
        "Focused work compounds.",
        "That was honest effort.",
        "Momentum is building.",
        "You're preparing seriously.",
        "Progress stacks quietly.",
        "Well done. Stay steady.",
        "This is real preparation.",
        "Focus like this pays off.",
        "Strong session completed.",
        "You earned this break.",
        "Keep this rhythm.",
        "Another block done.",
        "You didn't rush. You stayed.",
        "This is discipline.",
        "Results follow effort.",
        "You're on track.",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_study_minutes: default_study_minutes(),
            break_minutes: default_break_minutes(),
            appreciation_intervals: default_appreciation_intervals(),
            appreciation: AppreciationPolicy::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_enabled: default_true(),
            player: default_player(),
            study_track: default_study_track(),
            break_tracks: default_break_tracks(),
            start_cue: None,
            end_cue: None,
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            motivation: default_motivation(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, StudyError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, StudyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StudyError::Configuration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            StudyError::Configuration(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), StudyError> {
        let contents = serde_yaml::to_string(self).map_err(|e| {
            StudyError::Configuration(format!("Failed to serialize config: {e}"))
        })?;

        std::fs::write(path, contents).map_err(|e| {
            StudyError::Configuration(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Check the settings and build the duration lookup table.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Configuration` describing the first problem found.
    pub fn validate(&self) -> Result<DurationTable, StudyError> {
        let timer = &self.timer;
        let table = DurationTable::new(
            timer.break_minutes.clone(),
            timer.appreciation_intervals.clone(),
            timer.appreciation,
        )?;

        table.session_config(timer.default_study_minutes).map_err(|_| {
            StudyError::Configuration(format!(
                "default_study_minutes {} is not one of the configured durations",
                timer.default_study_minutes
            ))
        })?;

        if timer.appreciation == AppreciationPolicy::CountBased
            && self.messages.motivation.is_empty()
        {
            return Err(StudyError::Configuration(
                "messages.motivation must not be empty with count-based appreciation".to_string(),
            ));
        }

        Ok(table)
    }
}
