//! Application state for the TUI.

use std::time::Instant;

use crate::audio::AudioBackend;
use crate::config::Config;
use crate::error::StudyError;
use crate::session::{
    AudioPort, Interstitial, IntervalScheduler, Phase, Presenter, SessionConfig,
    SessionController, SessionEvent,
};

/// Prompt card currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Which prompt this is.
    pub kind: Interstitial,
    /// Body text.
    pub message: String,
}

/// What the screen shows, kept current by controller notifications.
#[derive(Debug, Clone)]
pub struct View {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub session_count: u32,
    pub music_enabled: bool,
    pub config: SessionConfig,
    pub card: Option<Card>,
}

impl Default for View {
    /// Blank view; the controller's first `refresh` fills it in.
    fn default() -> Self {
        Self {
            phase: Phase::Studying,
            remaining_seconds: 0,
            session_count: 1,
            music_enabled: true,
            config: SessionConfig {
                study_minutes: 0,
                break_minutes: 0,
                appreciation_interval: 0,
            },
            card: None,
        }
    }
}

impl Presenter for View {
    fn notify(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tick {
                remaining_seconds,
                session_count,
            } => {
                self.remaining_seconds = remaining_seconds;
                self.session_count = session_count;
            }
            SessionEvent::PhaseChanged { phase } => self.phase = phase,
            SessionEvent::MusicStateChanged { enabled } => self.music_enabled = enabled,
            SessionEvent::InterstitialShown { kind, message } => {
                self.card = Some(Card { kind, message });
            }
            SessionEvent::InterstitialHidden => self.card = None,
            SessionEvent::DurationChanged { config } => self.config = config,
        }
    }
}

/// Controller wired to the terminal view.
pub type TuiController<A> = SessionController<A, View, IntervalScheduler>;

/// Application state.
pub struct App<A: AudioPort = AudioBackend> {
    /// The session state machine.
    pub controller: TuiController<A>,
    /// Selectable study durations, in key order.
    pub durations: Vec<u32>,
    /// Status message to display.
    pub status: Option<String>,
    /// Audio backend description for the status bar.
    pub audio_label: &'static str,
}

impl App<AudioBackend> {
    /// Create the app from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or `study_minutes` is unmapped.
    pub fn new(config: &Config, study_minutes: Option<u32>, music: bool) -> Result<Self, StudyError> {
        let audio = AudioBackend::from_config(&config.audio);
        let audio_label = audio.describe();
        let mut app = Self::with_audio(config, audio, study_minutes, music)?;
        app.audio_label = audio_label;
        Ok(app)
    }

    /// Housekeeping for the audio backend.
    pub fn maintain_audio(&mut self) {
        self.controller.audio_mut().maintain();
    }
}

impl<A: AudioPort> App<A> {
    /// Create the app with an explicit audio port.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or `study_minutes` is unmapped.
    pub fn with_audio(
        config: &Config,
        audio: A,
        study_minutes: Option<u32>,
        music: bool,
    ) -> Result<Self, StudyError> {
        let mut controller = SessionController::from_config(
            config,
            audio,
            View::default(),
            IntervalScheduler::starting_now(),
        )?;

        if !music && controller.music_enabled() {
            controller.toggle_music();
        }
        if let Some(minutes) = study_minutes {
            controller.select_duration(minutes)?;
        }
        controller.refresh();

        Ok(Self {
            durations: controller.table().study_options(),
            controller,
            status: Some("Press ? for help".to_string()),
            audio_label: "custom",
        })
    }

    /// The current view.
    pub fn view(&self) -> &View {
        self.controller.presenter()
    }

    /// Run ticks that are due.
    pub fn tick(&mut self, now: Instant) {
        self.controller.advance(now);
    }

    /// Start the countdown.
    pub fn start(&mut self) {
        if self.controller.interstitial().is_pending() {
            self.status = Some("Press Enter to continue first".to_string());
            return;
        }
        self.controller.start();
        self.status = None;
    }

    /// Pause the countdown.
    pub fn pause(&mut self) {
        self.controller.pause();
        self.status = Some("Paused".to_string());
    }

    /// Reset to the first session.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.status = Some("Reset".to_string());
    }

    /// Toggle music.
    pub fn toggle_music(&mut self) {
        self.controller.toggle_music();
        self.status = Some(if self.controller.music_enabled() {
            "Music ON".to_string()
        } else {
            "Music OFF".to_string()
        });
    }

    /// Skip to the next break track.
    pub fn next_track(&mut self) {
        self.controller.next_break_track();
        if let Some(index) = self.controller.current_break_track() {
            self.status = Some(format!("Break track {}", index + 1));
        }
    }

    /// Continue past the current prompt.
    pub fn continue_session(&mut self) {
        self.controller.resolve_interstitial();
    }

    /// Select a study duration by its position in the list (0-based).
    pub fn select_duration(&mut self, position: usize) {
        if self.controller.is_running() {
            self.status = Some("Pause before changing the duration".to_string());
            return;
        }

        let Some(&minutes) = self.durations.get(position) else {
            self.status = Some(format!("No duration #{}", position + 1));
            return;
        };

        self.status = Some(match self.controller.select_duration(minutes) {
            Ok(()) => format!(
                "Study {minutes} min, break {} min",
                self.controller.config().break_minutes
            ),
            Err(e) => e.to_string(),
        });
    }

    /// Show the key help.
    pub fn show_help(&mut self) {
        self.status = Some(
            "s:start | p:pause | r:reset | m:music | n:next track | 1-9:duration | Enter:continue | q:quit"
                .to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use std::time::Duration;

    fn app() -> App<SilentAudio> {
        App::with_audio(&Config::default(), SilentAudio, None, true).unwrap()
    }

    #[test]
    fn test_view_follows_controller() {
        let mut app = app();
        assert_eq!(app.view().remaining_seconds, 1500);
        assert_eq!(app.view().config.break_minutes, 5);

        let origin = app.controller.scheduler().now();
        app.start();
        app.tick(origin + Duration::from_secs(3));

        assert_eq!(app.view().remaining_seconds, 1497);
        assert_eq!(app.view().phase, Phase::Studying);
    }

    #[test]
    fn test_view_starts_from_configured_default() {
        let mut config = Config::default();
        config.timer.default_study_minutes = 45;
        let app = App::with_audio(&config, SilentAudio, None, false).unwrap();

        assert_eq!(app.view().config.study_minutes, 45);
        assert_eq!(app.view().config.break_minutes, 10);
        assert_eq!(app.view().remaining_seconds, 2700);
        assert!(!app.view().music_enabled);
        assert_eq!(app.durations, vec![25, 45, 60]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.timer.default_study_minutes = 30;

        let result = App::with_audio(&config, SilentAudio, None, true);
        assert!(matches!(result, Err(StudyError::Configuration(_))));
    }

    #[test]
    fn test_select_duration_by_position() {
        let mut app = app();
        app.select_duration(2);

        assert_eq!(app.view().config.study_minutes, 60);
        assert_eq!(app.view().remaining_seconds, 3600);
        assert_eq!(app.status.as_deref(), Some("Study 60 min, break 20 min"));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut app = app();
        app.select_duration(8);

        assert_eq!(app.view().config.study_minutes, 25);
        assert_eq!(app.status.as_deref(), Some("No duration #9"));
    }

    #[test]
    fn test_select_while_running_shows_notice() {
        let mut app = app();
        app.start();
        app.select_duration(1);

        assert_eq!(app.view().config.study_minutes, 25);
        assert!(app.status.unwrap().contains("Pause"));
    }

    #[test]
    fn test_card_shown_and_hidden() {
        let mut config = Config::default();
        config.timer.default_study_minutes = 60;
        let mut app = App::with_audio(&config, SilentAudio, None, true).unwrap();

        app.start();
        for _ in 0..3600 {
            app.controller.tick();
        }

        let card = app.view().card.clone().unwrap();
        assert_eq!(card.kind, Interstitial::AwaitingStudyContinue);
        assert!(config.messages.motivation.contains(&card.message));

        app.continue_session();
        assert!(app.view().card.is_none());
        assert_eq!(app.view().phase, Phase::OnBreak);
    }

    #[test]
    fn test_music_flag_from_cli() {
        let app = App::with_audio(&Config::default(), SilentAudio, None, false).unwrap();
        assert!(!app.view().music_enabled);
    }

    #[test]
    fn test_initial_minutes_override() {
        let app = App::with_audio(&Config::default(), SilentAudio, Some(45), true).unwrap();
        assert_eq!(app.view().remaining_seconds, 2700);

        let err = App::with_audio(&Config::default(), SilentAudio, Some(30), true);
        assert!(matches!(err, Err(StudyError::Configuration(_))));
    }
}
