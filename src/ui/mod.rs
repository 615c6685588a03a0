//! User interface components.
//!
//! Provides the terminal implementations of the lyric and background
//! renderers and the drawing function for the host's screen.

mod background;
mod lyric_view;

pub use background::{backdrop_factory, BackdropState, SharedBackdrop, TerminalBackground};
pub use lyric_view::TerminalLyricView;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::playback::PlaybackState;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Status bar at bottom
        ])
        .split(f.size());

    if let Some(state) = app.backdrop().borrow().as_ref() {
        let color = state.color(app.elapsed_secs());
        f.render_widget(Block::default().style(Style::default().bg(color)), f.size());
    }

    let lyric_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(chunks[0])[0];
    app.player().renderer().draw(f, lyric_area);

    draw_status_bar(f, app, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, border_color) = if app.error_message.is_some() {
        ("Error", Color::Red)
    } else {
        ("Status", Color::Yellow)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    let text = app.error_message.as_ref().map_or_else(
        || status_line(app),
        |err| Line::from(Span::styled(format!(" {err}"), Style::default().fg(Color::Red))),
    );

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn status_line(app: &App) -> Line<'static> {
    let clock = app.player().clock();
    let state = match clock.state() {
        PlaybackState::Idle => "idle",
        PlaybackState::Playing => "playing",
        PlaybackState::Stopped => "paused",
    };
    let position = format_time(clock.current_time_ms());
    let total = clock.duration_ms().map_or_else(|| "--:--".to_string(), format_time);
    let loading = if app.is_loading { " | loading..." } else { "" };

    Line::from(vec![
        Span::styled(format!(" {state} "), Style::default().fg(Color::Cyan)),
        Span::raw(format!("{position} / {total} | {} lines{loading}", app.player().line_count())),
        Span::styled(
            " | space: play/pause  ←/→: seek  ↑/↓: line  r: reload  q: quit",
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn format_time(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
