//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::session::{format_mmss, progress, AudioPort, Interstitial, Phase};
use crate::tui::app::{App, Card};

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Studying => Color::Cyan,
        Phase::OnBreak => Color::Green,
    }
}

/// Render the application UI.
pub fn render<A: AudioPort>(frame: &mut Frame<'_>, app: &App<A>) {
    // Create layout: header, timer, durations, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(7),    // Timer
            Constraint::Length(3), // Durations
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_timer(frame, app, chunks[1]);
    render_durations(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if let Some(card) = &app.view().card {
        let area = frame.area();
        render_card(frame, card, area);
    }
}

/// Render the mode header.
fn render_header<A: AudioPort>(frame: &mut Frame<'_>, app: &App<A>, area: Rect) {
    let view = app.view();
    let color = phase_color(view.phase);

    let lines = vec![
        Line::from(Span::styled(
            view.phase.display_name(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.phase.tagline(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(header, area);
}

/// Render the countdown, session info and progress.
fn render_timer<A: AudioPort>(frame: &mut Frame<'_>, app: &App<A>, area: Rect) {
    let view = app.view();
    let color = phase_color(view.phase);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Session
            Constraint::Length(1), // Break info
            Constraint::Length(1), // Music
            Constraint::Min(1),    // Gauge
        ])
        .split(inner);

    let running = if app.controller.is_running() { "" } else { "  (paused)" };
    let countdown = Paragraph::new(Line::from(vec![
        Span::styled(
            format_mmss(view.remaining_seconds),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(running, Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(countdown, rows[0]);

    let session = Paragraph::new(format!("Session {}", view.session_count))
        .alignment(Alignment::Center);
    frame.render_widget(session, rows[1]);

    let break_info = Paragraph::new(format!("Break time: {} minutes", view.config.break_minutes))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(break_info, rows[2]);

    let mut music = vec![Span::raw(if view.music_enabled {
        "Music ON"
    } else {
        "Music OFF"
    })];
    if let Some(index) = app.controller.current_break_track() {
        music.push(Span::styled(
            format!("  track {}  [n] next", index + 1),
            Style::default().fg(Color::Blue),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(music)).alignment(Alignment::Center),
        rows[3],
    );

    let total = view.config.phase_seconds(view.phase);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(progress(view.remaining_seconds, total))
        .label("");
    frame.render_widget(gauge, rows[4]);
}

/// Render the selectable study durations.
fn render_durations<A: AudioPort>(frame: &mut Frame<'_>, app: &App<A>, area: Rect) {
    let selected = app.view().config.study_minutes;

    let spans: Vec<Span<'_>> = app
        .durations
        .iter()
        .enumerate()
        .map(|(i, &minutes)| {
            let style = if minutes == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(format!(" [{}] {minutes} min ", i + 1), style)
        })
        .collect();

    let durations = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Study time "));

    frame.render_widget(durations, area);
}

/// Render the status bar.
fn render_status_bar<A: AudioPort>(frame: &mut Frame<'_>, app: &App<A>, area: Rect) {
    let default_help = format!(
        "s:start | p:pause | r:reset | m:music | ?:help | q:quit  [{}]",
        app.audio_label
    );
    let status_text = app.status.as_deref().unwrap_or(&default_help);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Render a prompt card over the centre of the screen.
fn render_card(frame: &mut Frame<'_>, card: &Card, area: Rect) {
    let popup = centered(area, 50, 9);
    let color = match card.kind {
        Interstitial::AwaitingStudyContinue => Color::Yellow,
        Interstitial::AwaitingBreakContinue | Interstitial::None => Color::Cyan,
    };

    let lines = vec![
        Line::from(Span::styled(
            card.kind.title(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(card.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            format!("[Enter] {}", card.kind.action_label()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text<A: AudioPort>(app: &App<A>) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_centered_clips() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered(area, 50, 9);
        assert_eq!(rect, area);

        let rect = centered(Rect::new(0, 0, 100, 30), 50, 10);
        assert_eq!(rect, Rect::new(25, 10, 50, 10));
    }

    #[test]
    fn test_renders_study_screen() {
        let app = App::with_audio(&Config::default(), SilentAudio, None, true).unwrap();
        let text = screen_text(&app);

        assert!(text.contains("STUDY MODE"));
        assert!(text.contains("25:00"));
        assert!(text.contains("Session 1"));
        assert!(text.contains("Break time: 5 minutes"));
    }

    #[test]
    fn test_renders_break_card() {
        let mut config = Config::default();
        config.timer.appreciation = crate::session::AppreciationPolicy::Disabled;
        let mut app = App::with_audio(&config, SilentAudio, Some(25), true).unwrap();
        app.start();
        for _ in 0..(25 * 60 + 5 * 60) {
            app.controller.tick();
        }

        let text = screen_text(&app);
        assert!(text.contains("Break complete"));
        assert!(text.contains("Start Study"));
    }
}
