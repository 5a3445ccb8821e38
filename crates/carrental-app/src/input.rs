//! Terminal-agnostic keyboard input and focus handling.
//!
//! [`FormInput`] owns which control has focus and turns key presses into
//! calls on the [`App`] API. Text editing is append/backspace only.

use crate::{App, AppAction, FormField};

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) so key handling can be tested without a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete last character).
    Backspace,
    /// Tab key (next control).
    Tab,
    /// Shift+Tab (previous control).
    BackTab,
    /// Escape key (quit).
    Esc,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}

/// Focusable controls, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// A reservation text field.
    Field(FormField),
    /// The reservation Submit button.
    Submit,
    /// The reservation id text field.
    LookupId,
    /// The Lookup button.
    Lookup,
}

impl Focus {
    /// Every control in navigation order.
    pub const ORDER: [Self; FormField::COUNT + 3] = [
        Self::Field(FormField::City),
        Self::Field(FormField::Classification),
        Self::Field(FormField::Start),
        Self::Field(FormField::End),
        Self::Field(FormField::FirstName),
        Self::Field(FormField::LastName),
        Self::Field(FormField::CustomerId),
        Self::Field(FormField::CreditCardNumber),
        Self::Submit,
        Self::LookupId,
        Self::Lookup,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next control, wrapping around.
    pub fn next(self) -> Self {
        let next = (self.position() + 1) % Self::ORDER.len();
        Self::ORDER[next]
    }

    /// Previous control, wrapping around.
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

impl Default for Focus {
    fn default() -> Self {
        Self::Field(FormField::City)
    }
}

/// Key handler for the reservation and lookup forms.
#[derive(Debug, Default)]
pub struct FormInput {
    focus: Focus,
}

impl FormInput {
    /// Handler with focus on the first field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Control that currently has focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Move focus directly to `focus`.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Handle a key input event.
    ///
    /// Returns actions to process. Enter on a disabled Submit returns
    /// nothing.
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => self.edit(app, |text| text.push(c)),
            KeyInput::Backspace => self.edit(app, |text| {
                text.pop();
            }),
            KeyInput::Tab | KeyInput::Down => {
                self.focus = self.focus.next();
                vec![AppAction::Render]
            },
            KeyInput::BackTab | KeyInput::Up => {
                self.focus = self.focus.prev();
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Esc => app.quit(),
        }
    }

    fn edit(&self, app: &mut App, change: impl FnOnce(&mut String)) -> Vec<AppAction> {
        match self.focus {
            Focus::Field(field) => {
                let mut text = app.field(field).to_owned();
                change(&mut text);
                app.set_field(field, text)
            },
            Focus::LookupId => {
                let mut text = app.lookup_id().to_owned();
                change(&mut text);
                app.set_lookup_id(text)
            },
            Focus::Submit | Focus::Lookup => vec![],
        }
    }

    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        match self.focus {
            Focus::Field(_) => {
                self.focus = self.focus.next();
                vec![AppAction::Render]
            },
            Focus::Submit if app.submit_enabled() => app.submit_reservation(),
            Focus::Submit => vec![],
            Focus::LookupId | Focus::Lookup => app.lookup_reservation(),
        }
    }
}
