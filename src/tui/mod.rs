//! Terminal User Interface (TUI) for studybreak.
//!
//! Shows the countdown, the current phase and the prompt cards, and maps
//! key presses onto controller commands. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Card, View};
pub use event::{map_key, Action};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::config::Config;
use crate::error::StudyError;

/// How long to wait for a key press before checking the clock again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the terminal fails.
pub fn run(config: &Config, study_minutes: Option<u32>, music: bool) -> Result<(), StudyError> {
    // Build the app before touching the terminal so config errors print normally
    let mut app = App::new(config, study_minutes, music)?;

    // Setup terminal
    enable_raw_mode().map_err(|e| StudyError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StudyError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StudyError::Terminal(format!("Failed to create terminal: {e}")))?;

    info!(audio = app.audio_label, "tui started");
    let result = run_app(&mut terminal, &mut app);

    // Silence the players before handing the terminal back
    app.controller.pause();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), StudyError> {
    loop {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StudyError::Terminal(format!("Failed to draw: {e}")))?;

        let action = event::poll_action(POLL_INTERVAL)?;

        // Ticks due so far run before the key press is applied
        app.tick(Instant::now());
        app.maintain_audio();

        if let Some(action) = action {
            match action {
                Action::Quit => break,
                Action::Start => app.start(),
                Action::Pause => app.pause(),
                Action::Reset => app.reset(),
                Action::ToggleMusic => app.toggle_music(),
                Action::NextTrack => app.next_track(),
                Action::SelectDuration(position) => app.select_duration(position),
                Action::Continue => app.continue_session(),
                Action::Help => app.show_help(),
            }
        }
    }

    Ok(())
}
