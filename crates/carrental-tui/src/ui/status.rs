//! Status bar
//!
//! Displays connection status and the latest status message.

use carrental_app::ConnectionState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const KEY_HINTS: &str = " | Tab: next  Enter: select  Esc: quit";

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Disconnected => {
            Span::styled("Disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Connected { session: Some(session) } => Span::styled(
            format!("Connected ({session})"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Connected { session: None } => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let mut spans = vec![
        Span::raw(" "),
        connection_status,
        Span::styled(format!(" | {}", app.server_addr()), Style::default().fg(Color::Gray)),
    ];
    if let Some(message) = app.status_message() {
        spans.push(Span::raw(format!(" | {message}")));
    }
    spans.push(Span::styled(KEY_HINTS, Style::default().fg(Color::Gray)));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
