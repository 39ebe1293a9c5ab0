//! The study/break session state machine.
//!
//! [`SessionController`] owns every piece of session state. Commands and the
//! per-second tick run to completion on the caller's thread; the ports it
//! drives never receive a handle back to it, so no command can run while
//! another is still executing.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::StudyError;
use crate::session::messages::MotivationMessages;
use crate::session::music::{try_play, MusicSequencer};
use crate::session::ports::{AudioPort, Presenter, SessionEvent, Track};
use crate::session::schedule::{TickHandle, TickScheduler, TICK_PERIOD};
use crate::session::state::{Interstitial, Phase, SessionSnapshot, SessionState};
use crate::session::table::{DurationTable, SessionConfig};

/// Prompt shown when a break runs out.
pub const BREAK_COMPLETE_PROMPT: &str = "Ready to resume focused study?";

/// Drives study and break phases, music, and interstitial prompts.
pub struct SessionController<A, P, S> {
    table: DurationTable,
    config: SessionConfig,
    state: SessionState,
    music: MusicSequencer,
    messages: MotivationMessages,
    tick: Option<TickHandle>,
    audio: A,
    presenter: P,
    scheduler: S,
}

impl<A, P, S> SessionController<A, P, S>
where
    A: AudioPort,
    P: Presenter,
    S: TickScheduler,
{
    /// Create a controller at the start of the first study phase.
    ///
    /// Music starts enabled with an empty break playlist; use the `with_*`
    /// builders to change that.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Configuration` if `study_minutes` is not in `table`.
    pub fn new(
        table: DurationTable,
        study_minutes: u32,
        audio: A,
        presenter: P,
        scheduler: S,
    ) -> Result<Self, StudyError> {
        let config = table.session_config(study_minutes)?;

        Ok(Self {
            state: SessionState::initial(&config),
            table,
            config,
            music: MusicSequencer::new(true, 0),
            messages: MotivationMessages::default(),
            tick: None,
            audio,
            presenter,
            scheduler,
        })
    }

    /// Create a controller from validated settings.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Configuration` if the settings are invalid.
    pub fn from_config(
        config: &Config,
        audio: A,
        presenter: P,
        scheduler: S,
    ) -> Result<Self, StudyError> {
        let table = config.validate()?;

        Ok(Self::new(
            table,
            config.timer.default_study_minutes,
            audio,
            presenter,
            scheduler,
        )?
        .with_music(config.audio.music_enabled, config.audio.break_tracks.len())
        .with_messages(MotivationMessages::new(config.messages.motivation.clone())))
    }

    /// Set the initial music flag and break playlist length.
    #[must_use]
    pub fn with_music(mut self, enabled: bool, break_playlist_len: usize) -> Self {
        self.music = MusicSequencer::new(enabled, break_playlist_len);
        self
    }

    /// Replace the motivation message picker.
    #[must_use]
    pub fn with_messages(mut self, messages: MotivationMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Push the full current state to the presenter.
    pub fn refresh(&mut self) {
        self.presenter.notify(SessionEvent::PhaseChanged {
            phase: self.state.phase,
        });
        self.presenter.notify(SessionEvent::DurationChanged {
            config: self.config,
        });
        self.presenter.notify(SessionEvent::MusicStateChanged {
            enabled: self.music.is_enabled(),
        });
        self.notify_tick();
    }

    /// Start the countdown.
    ///
    /// Ignored while already running or while a prompt is pending.
    pub fn start(&mut self) {
        if self.state.running || self.state.interstitial.is_pending() {
            return;
        }

        self.state.running = true;
        self.play_cue(Track::StartCue);
        self.music.play_for(self.state.phase, &mut self.audio);

        self.cancel_tick();
        self.tick = Some(self.scheduler.schedule_repeating(TICK_PERIOD));
        info!(
            phase = ?self.state.phase,
            remaining = self.state.remaining_seconds,
            "countdown started"
        );
    }

    /// Stop the countdown and silence the music.
    pub fn pause(&mut self) {
        self.cancel_tick();
        self.state.running = false;
        self.music.stop_all(&mut self.audio);
    }

    /// Return to the first study session with the current durations.
    pub fn reset(&mut self) {
        self.pause();

        let had_prompt = self.state.interstitial.is_pending();
        self.state = SessionState::initial(&self.config);
        self.music.reset();

        if had_prompt {
            self.presenter.notify(SessionEvent::InterstitialHidden);
        }
        self.presenter.notify(SessionEvent::PhaseChanged {
            phase: Phase::Studying,
        });
        self.notify_tick();
        info!(study_minutes = self.config.study_minutes, "session reset");
    }

    /// Advance the countdown by one second.
    ///
    /// Ticks arriving while the countdown is stopped are ignored.
    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.notify_tick();

        if self.state.remaining_seconds == 0 {
            self.on_session_end();
        }
    }

    /// Run every tick the scheduler has due at `now`.
    pub fn advance(&mut self, now: Instant) {
        self.scheduler.observe(now);
        while let Some(handle) = self.tick {
            if !self.scheduler.poll_tick(handle, now) {
                break;
            }
            self.tick();
        }
    }

    /// Dismiss the pending prompt and start the next phase.
    pub fn resolve_interstitial(&mut self) {
        match self.state.interstitial {
            Interstitial::None => {}
            Interstitial::AwaitingStudyContinue => {
                self.clear_interstitial();
                self.begin_break();
            }
            Interstitial::AwaitingBreakContinue => {
                self.clear_interstitial();
                self.begin_study();
            }
        }
    }

    /// Switch music on or off without touching the countdown.
    pub fn toggle_music(&mut self) {
        let enabled = self.music.toggle();

        if enabled {
            if self.state.running && !self.state.interstitial.is_pending() {
                self.music.play_for(self.state.phase, &mut self.audio);
            }
        } else {
            self.music.stop_all(&mut self.audio);
        }

        self.presenter
            .notify(SessionEvent::MusicStateChanged { enabled });
        debug!(enabled, "music toggled");
    }

    /// Skip to the next break track.
    ///
    /// Only meaningful during a break; the countdown is unaffected.
    pub fn next_break_track(&mut self) {
        if self.state.phase != Phase::OnBreak || self.state.interstitial.is_pending() {
            return;
        }
        self.music.next_track(&mut self.audio);
    }

    /// Choose a new study duration while stopped.
    ///
    /// Ignored while running. In a study phase the countdown restarts at the
    /// new length; during a break only future phases are affected.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Configuration` if `minutes` is not configured.
    /// The session state is left untouched in that case.
    pub fn select_duration(&mut self, minutes: u32) -> Result<(), StudyError> {
        if self.state.running {
            return Ok(());
        }

        let config = self.table.session_config(minutes).inspect_err(|e| {
            warn!(minutes, error = %e, "duration rejected");
        })?;

        self.config = config;
        if self.state.phase == Phase::Studying {
            self.state.remaining_seconds = config.study_seconds();
        }

        self.presenter
            .notify(SessionEvent::DurationChanged { config });
        self.notify_tick();
        info!(
            study_minutes = config.study_minutes,
            break_minutes = config.break_minutes,
            "duration selected"
        );
        Ok(())
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Study session number, starting at 1.
    #[must_use]
    pub const fn session_count(&self) -> u32 {
        self.state.session_count
    }

    /// Whether the countdown is ticking.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Whether music is enabled.
    #[must_use]
    pub const fn music_enabled(&self) -> bool {
        self.music.is_enabled()
    }

    /// Pending prompt.
    #[must_use]
    pub const fn interstitial(&self) -> Interstitial {
        self.state.interstitial
    }

    /// Break playlist position while on a break.
    #[must_use]
    pub const fn current_break_track(&self) -> Option<usize> {
        if self.state.phase.is_break() {
            self.music.current_break_track()
        } else {
            None
        }
    }

    /// Active durations.
    #[must_use]
    pub const fn config(&self) -> SessionConfig {
        self.config
    }

    /// Configured duration mappings.
    #[must_use]
    pub const fn table(&self) -> &DurationTable {
        &self.table
    }

    /// Whether a tick schedule is armed.
    #[must_use]
    pub const fn has_active_tick(&self) -> bool {
        self.tick.is_some()
    }

    /// Serializable copy of the session state.
    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase,
            remaining_seconds: self.state.remaining_seconds,
            session_count: self.state.session_count,
            running: self.state.running,
            music_enabled: self.music.is_enabled(),
            interstitial: self.state.interstitial,
            current_break_track: self.current_break_track(),
            config: self.config,
        }
    }

    /// The presentation port.
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The audio port.
    pub const fn audio(&self) -> &A {
        &self.audio
    }

    /// Mutable access to the audio port, for backend housekeeping.
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// The tick scheduler.
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn on_session_end(&mut self) {
        self.pause();
        self.play_cue(Track::EndCue);
        info!(phase = ?self.state.phase, session = self.state.session_count, "phase finished");

        match self.state.phase {
            Phase::Studying => {
                let fires = self.table.policy().fires(
                    self.state.session_count,
                    self.config.appreciation_interval,
                    self.state.appreciation_shown,
                );

                if fires {
                    self.state.appreciation_shown = true;
                    let message = self.messages.pick();
                    self.show_interstitial(Interstitial::AwaitingStudyContinue, message);
                } else {
                    self.begin_break();
                }
            }
            Phase::OnBreak => {
                self.show_interstitial(
                    Interstitial::AwaitingBreakContinue,
                    BREAK_COMPLETE_PROMPT.to_string(),
                );
            }
        }
    }

    fn begin_break(&mut self) {
        self.state.phase = Phase::OnBreak;
        self.state.remaining_seconds = self.config.break_seconds();
        self.music.begin_break();

        self.presenter.notify(SessionEvent::PhaseChanged {
            phase: Phase::OnBreak,
        });
        self.notify_tick();
        self.start();
    }

    fn begin_study(&mut self) {
        self.state.phase = Phase::Studying;
        self.state.session_count += 1;
        self.state.remaining_seconds = self.config.study_seconds();
        self.state.appreciation_shown = false;

        self.presenter.notify(SessionEvent::PhaseChanged {
            phase: Phase::Studying,
        });
        self.notify_tick();
        self.start();
    }

    fn show_interstitial(&mut self, kind: Interstitial, message: String) {
        self.state.interstitial = kind;
        info!(?kind, "interstitial shown");
        self.presenter
            .notify(SessionEvent::InterstitialShown { kind, message });
    }

    fn clear_interstitial(&mut self) {
        self.state.interstitial = Interstitial::None;
        self.presenter.notify(SessionEvent::InterstitialHidden);
    }

    fn play_cue(&mut self, cue: Track) {
        self.audio.seek(cue, Duration::ZERO);
        try_play(&mut self.audio, cue);
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn notify_tick(&mut self) {
        self.presenter.notify(SessionEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
            session_count: self.state.session_count,
        });
    }
}
