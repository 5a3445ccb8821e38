//! Result panels
//!
//! The latest reservation answer, the lookup input and the latest lookup
//! answer. Notice wording comes from the app layer.

use carrental_app::{Focus, FormInput, LookupNotice, ReservationNotice};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::text_width;
use crate::App;

const LOOKUP_PROMPT: &str = "Reservation ID: ";
const BORDER: u16 = 1;

/// Render the latest reservation answer.
pub fn render_reservation(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.reservation_notice() {
        Some(notice @ ReservationNotice::Confirmed { .. }) => {
            styled(notice.lines(), Style::default().fg(Color::Green))
        },
        Some(notice @ ReservationNotice::Unavailable) => {
            styled(notice.lines(), Style::default().fg(Color::Yellow))
        },
        None => placeholder("Fill in every field, then Submit."),
    };

    render_panel(frame, " Reservation ", lines, area);
}

/// Render the reservation id input and the Lookup button.
pub fn render_lookup_input(frame: &mut Frame, app: &App, input: &FormInput, area: Rect) {
    let focus = input.focus();
    let prompt_style = if focus == Focus::LookupId {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut button_style = Style::default().fg(Color::Cyan);
    if focus == Focus::Lookup {
        button_style = button_style.add_modifier(Modifier::REVERSED);
    }

    let line = Line::from(vec![
        Span::styled(LOOKUP_PROMPT, prompt_style),
        Span::styled(app.lookup_id().to_owned(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled("[ Lookup ]", button_style),
    ]);

    let block = Block::default().borders(Borders::ALL).title(" Find a reservation ");
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focus == Focus::LookupId {
        let cursor_x = area
            .x
            .saturating_add(BORDER + text_width(LOOKUP_PROMPT))
            .saturating_add(text_width(app.lookup_id()));
        let max_x = area.x.saturating_add(area.width).saturating_sub(BORDER + 1);

        frame.set_cursor_position((cursor_x.min(max_x), area.y.saturating_add(BORDER)));
    }
}

/// Render the latest lookup answer.
pub fn render_lookup(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.lookup_notice() {
        Some(notice @ LookupNotice::Details(_)) => {
            styled(notice.lines(), Style::default().fg(Color::White))
        },
        Some(notice @ LookupNotice::InvalidReservationId) => {
            styled(notice.lines(), Style::default().fg(Color::Red))
        },
        None => placeholder("Enter a confirmation number, then Lookup."),
    };

    render_panel(frame, " Reservation details ", lines, area);
}

fn render_panel(frame: &mut Frame, title: &'static str, lines: Vec<Line<'static>>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(title);
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn styled(lines: Vec<String>, style: Style) -> Vec<Line<'static>> {
    lines.into_iter().map(|line| Line::styled(line, style)).collect()
}

fn placeholder(text: &'static str) -> Vec<Line<'static>> {
    vec![Line::styled(text, Style::default().fg(Color::DarkGray))]
}
