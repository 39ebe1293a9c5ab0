//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::StudyError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start the countdown.
    Start,
    /// Pause the countdown.
    Pause,
    /// Reset to the first session.
    Reset,
    /// Toggle music.
    ToggleMusic,
    /// Skip to the next break track.
    NextTrack,
    /// Select the study duration at this list position.
    SelectDuration(usize),
    /// Continue past the current prompt.
    Continue,
    /// Show the key help.
    Help,
}

/// Poll for a key press and translate it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_action(timeout: Duration) -> Result<Option<Action>, StudyError> {
    if !event::poll(timeout).map_err(|e| StudyError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| StudyError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
        _ => Ok(None),
    }
}

/// Translate a key press into an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s' | ' ') => Some(Action::Start),
        KeyCode::Char('p') => Some(Action::Pause),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('m') => Some(Action::ToggleMusic),
        KeyCode::Char('n') => Some(Action::NextTrack),
        KeyCode::Enter | KeyCode::Char('c') => Some(Action::Continue),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char(d @ '1'..='9') => {
            let position = d.to_digit(10).map_or(0, |n| n as usize - 1);
            Some(Action::SelectDuration(position))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(map_key(key(KeyCode::Char('s'))), Some(Action::Start));
        assert_eq!(map_key(key(KeyCode::Char('p'))), Some(Action::Pause));
        assert_eq!(map_key(key(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(map_key(key(KeyCode::Char('m'))), Some(Action::ToggleMusic));
        assert_eq!(map_key(key(KeyCode::Char('n'))), Some(Action::NextTrack));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Action::Continue));
    }

    #[test]
    fn test_duration_digits() {
        assert_eq!(map_key(key(KeyCode::Char('1'))), Some(Action::SelectDuration(0)));
        assert_eq!(map_key(key(KeyCode::Char('3'))), Some(Action::SelectDuration(2)));
        assert_eq!(map_key(key(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
    }
}
