//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod form;
mod results;
mod status;

use carrental_app::FormInput;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &FormInput) {
    const RESERVE_AREA_HEIGHT: u16 = form::HEIGHT;
    const LOOKUP_AREA_MIN_HEIGHT: u16 = 6;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(RESERVE_AREA_HEIGHT),
            Constraint::Min(LOOKUP_AREA_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [reserve_area, lookup_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_reserve_area(frame, app, input, *reserve_area);
    render_lookup_area(frame, app, input, *lookup_area);
    status::render(frame, app, *status_area);
}

/// Render the reservation form beside its result.
fn render_reserve_area(frame: &mut Frame, app: &App, input: &FormInput, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let [form_area, result_area] = chunks.as_ref() else {
        return;
    };

    form::render(frame, app, input, *form_area);
    results::render_reservation(frame, app, *result_area);
}

/// Render the lookup input above the lookup result.
fn render_lookup_area(frame: &mut Frame, app: &App, input: &FormInput, area: Rect) {
    const LOOKUP_INPUT_HEIGHT: u16 = 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(LOOKUP_INPUT_HEIGHT), Constraint::Min(3)])
        .split(area);

    let [input_area, result_area] = chunks.as_ref() else {
        return;
    };

    results::render_lookup_input(frame, app, input, *input_area);
    results::render_lookup(frame, app, *result_area);
}

/// Width of `text` in cells, clamped to the terminal coordinate range.
fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}
