//! Study/break session control.
//!
//! Provides the session state machine and its collaborators:
//! - Study and break phase transitions
//! - Per-second countdown driven by a cancellable tick schedule
//! - Appreciation and break-complete prompts
//! - Study music and the wrap-around break playlist

pub mod controller;
pub mod messages;
pub mod music;
pub mod ports;
pub mod schedule;
pub mod state;
pub mod table;
pub mod timer;

#[cfg(test)]
pub(crate) mod fakes;

pub use controller::{SessionController, BREAK_COMPLETE_PROMPT};
pub use messages::MotivationMessages;
pub use music::MusicSequencer;
pub use ports::{AudioPort, Presenter, SessionEvent, Track};
pub use schedule::{IntervalScheduler, TickHandle, TickScheduler, TICK_PERIOD};
pub use state::{AppreciationPolicy, Interstitial, Phase, SessionSnapshot};
pub use table::{DurationTable, SessionConfig, MAX_PHASE_MINUTES};
pub use timer::{format_duration, format_mmss, progress, render_progress_bar};
