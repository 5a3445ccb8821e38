//! Reservation form
//!
//! One labelled input per reservation field, then the Submit button. The
//! button is greyed out until every field has a value.

use carrental_app::{Focus, FormField, FormInput};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::text_width;
use crate::App;

/// Rows needed: the fields, the Submit row and two borders.
pub const HEIGHT: u16 = FormField::COUNT as u16 + 3;

const LABEL_WIDTH: u16 = 20;
const MARKER_WIDTH: u16 = 2; // "> "
const BORDER: u16 = 1;

/// Render the reservation form.
pub fn render(frame: &mut Frame, app: &App, input: &FormInput, area: Rect) {
    let focus = input.focus();

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| field_line(field, app.field(field), focus == Focus::Field(field)))
        .collect();
    lines.push(submit_line(app.submit_enabled(), focus == Focus::Submit));

    let block = Block::default().borders(Borders::ALL).title(" Reserve a vehicle ");
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if let Focus::Field(field) = focus {
        let row = field.index() as u16;
        let cursor_x = area
            .x
            .saturating_add(BORDER + MARKER_WIDTH + LABEL_WIDTH)
            .saturating_add(text_width(app.field(field)));
        let max_x = area.x.saturating_add(area.width).saturating_sub(BORDER + 1);

        frame.set_cursor_position((cursor_x.min(max_x), area.y.saturating_add(BORDER + row)));
    }
}

fn field_line(field: FormField, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(
            format!("{:<width$}", format!("{}:", field.label()), width = usize::from(LABEL_WIDTH)),
            label_style,
        ),
        Span::styled(value.to_owned(), Style::default().fg(Color::White)),
    ])
}

fn submit_line(enabled: bool, focused: bool) -> Line<'static> {
    let color = if enabled { Color::Green } else { Color::DarkGray };
    let mut style = Style::default().fg(color);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Line::from(vec![Span::raw("  "), Span::styled("[ Submit ]", style)])
}
