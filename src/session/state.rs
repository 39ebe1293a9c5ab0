//! Session state types.

use serde::{Deserialize, Serialize};

use crate::session::table::SessionConfig;

/// Top-level mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Counting down a study interval.
    Studying,
    /// Counting down a break interval.
    OnBreak,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Studying => "STUDY MODE",
            Self::OnBreak => "BREAK MODE",
        }
    }

    /// Encouragement line shown under the mode title.
    #[must_use]
    pub const fn tagline(&self) -> &'static str {
        match self {
            Self::Studying => "Stay focused. Consistency beats talent.",
            Self::OnBreak => "Rest is part of success. Reset calmly.",
        }
    }

    /// Check if this is the break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::OnBreak)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Blocking prompt between phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interstitial {
    /// Nothing pending.
    #[default]
    None,
    /// Appreciation card after a study phase; continuing starts the break.
    AwaitingStudyContinue,
    /// Break finished; continuing starts the next study phase.
    AwaitingBreakContinue,
}

impl Interstitial {
    /// Check if a prompt is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Card title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::AwaitingStudyContinue => "Great work",
            Self::AwaitingBreakContinue => "Break complete",
        }
    }

    /// Label of the continue affordance.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::AwaitingStudyContinue => "Continue to Break",
            Self::AwaitingBreakContinue => "Start Study",
        }
    }
}

/// Rule deciding whether a study completion shows the appreciation card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppreciationPolicy {
    /// Fire every `appreciation_interval` sessions, once per threshold crossing.
    #[default]
    CountBased,
    /// Study completion always goes straight to the break.
    Disabled,
}

impl AppreciationPolicy {
    /// Decide whether the card fires for this study completion.
    ///
    /// An interval of 0 never fires.
    #[must_use]
    pub const fn fires(self, session_count: u32, interval: u32, already_shown: bool) -> bool {
        match self {
            Self::Disabled => false,
            Self::CountBased => {
                interval > 0 && !already_shown && session_count % interval == 0
            }
        }
    }
}

/// Mutable session state, written only by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionState {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub session_count: u32,
    pub running: bool,
    pub interstitial: Interstitial,
    pub appreciation_shown: bool,
}

impl SessionState {
    /// Fresh state at the start of the first study phase.
    pub const fn initial(config: &SessionConfig) -> Self {
        Self {
            phase: Phase::Studying,
            remaining_seconds: config.study_seconds(),
            session_count: 1,
            running: false,
            interstitial: Interstitial::None,
            appreciation_shown: false,
        }
    }
}

/// Serializable view of the controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Seconds left in the phase.
    pub remaining_seconds: u32,
    /// Study session number, starting at 1.
    pub session_count: u32,
    /// Whether the countdown is ticking.
    pub running: bool,
    /// Whether music is enabled.
    pub music_enabled: bool,
    /// Pending prompt, if any.
    pub interstitial: Interstitial,
    /// Break playlist position while on a break.
    pub current_break_track: Option<usize>,
    /// Active durations.
    pub config: SessionConfig,
}
