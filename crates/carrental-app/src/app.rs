//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the reservation form completely decoupled from I/O and protocol
//! mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Holds the eight reservation values and the lookup id.
//! - Owns the [`RequestGate`] and keeps `submit_enabled` in step with it.
//! - Keeps the latest reservation and lookup notices for rendering.
//! - Tracks high-level connection state for UI feedback.

use crate::{
    AppAction, AppEvent, ConnectionState, FormField, LookupNotice, RequestGate, ReservationForm,
    ReservationNotice, card,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal or server.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Server address for connection.
    server_addr: String,
    /// Reservation field values.
    form: ReservationForm,
    /// Readiness flags for the reservation fields.
    gate: RequestGate,
    /// Mirrors `gate.is_ready()` after every field change.
    submit_enabled: bool,
    /// Lookup input.
    lookup_id: String,
    /// Latest reservation answer. `None` until one arrives.
    reservation: Option<ReservationNotice>,
    /// Latest lookup answer. `None` until one arrives.
    lookup: Option<LookupNotice>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App with the given server address.
    pub fn new(server_addr: String) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            server_addr,
            form: ReservationForm::new(),
            gate: RequestGate::new(),
            submit_enabled: false,
            lookup_id: String::new(),
            reservation: None,
            lookup: None,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                vec![AppAction::Render]
            },
            AppEvent::Connected { session } => {
                self.state = ConnectionState::Connected { session };
                self.status_message = None;
                vec![AppAction::Render]
            },
            AppEvent::Disconnected { reason } => {
                self.state = ConnectionState::Disconnected;
                self.status_message = Some(format!("Disconnected: {reason}"));
                vec![AppAction::Render]
            },
            AppEvent::ReservationConfirmed(response) => {
                self.reservation = Some(ReservationNotice::confirmed(response));
                self.status_message = None;
                vec![AppAction::Render]
            },
            AppEvent::ReservationUnavailable => {
                self.reservation = Some(ReservationNotice::Unavailable);
                self.status_message = None;
                vec![AppAction::Render]
            },
            AppEvent::LookupDetails(response) => {
                self.lookup = Some(LookupNotice::Details(response));
                self.status_message = None;
                vec![AppAction::Render]
            },
            AppEvent::InvalidReservationId => {
                self.lookup = Some(LookupNotice::InvalidReservationId);
                self.status_message = None;
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Initiate connection to the server.
    pub fn connect(&mut self) -> Vec<AppAction> {
        self.state = ConnectionState::Connecting;
        vec![AppAction::Connect { server_addr: self.server_addr.clone() }, AppAction::Render]
    }

    /// Replace the value of a reservation field.
    ///
    /// The card number is regrouped on every edit. The gate sees the stored
    /// value and `submit_enabled` follows it immediately.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Vec<AppAction> {
        let mut value = value.into();
        if field == FormField::CreditCardNumber {
            value = card::format_card_number(&value);
        }

        self.gate.on_field_changed(field, &value);
        self.form.set(field, value);
        self.submit_enabled = self.gate.is_ready();

        vec![AppAction::Render]
    }

    /// Replace the lookup input.
    pub fn set_lookup_id(&mut self, value: impl Into<String>) -> Vec<AppAction> {
        self.lookup_id = value.into();
        vec![AppAction::Render]
    }

    /// Send the reservation form.
    ///
    /// Produces no request while the gate is closed.
    pub fn submit_reservation(&mut self) -> Vec<AppAction> {
        let request = self.submit_enabled.then(|| self.form.to_request()).flatten();

        let Some(request) = request else {
            let missing: Vec<_> = self.gate.missing().map(FormField::label).collect();
            self.status_message = Some(format!("Required: {}", missing.join(", ")));
            return vec![AppAction::Render];
        };

        self.status_message = Some("Searching for a vehicle...".to_owned());
        vec![AppAction::SendReservation(request), AppAction::Render]
    }

    /// Look up the reservation named in the lookup input.
    pub fn lookup_reservation(&mut self) -> Vec<AppAction> {
        self.status_message = Some("Looking up reservation...".to_owned());
        let reservation_id = self.lookup_id.clone();
        vec![AppAction::LookupReservation { reservation_id }, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Current connection state.
    pub fn connection_state(&self) -> &ConnectionState {
        &self.state
    }

    /// Server address (host:port).
    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    /// Current value of a reservation field.
    pub fn field(&self, field: FormField) -> &str {
        self.form.get(field)
    }

    /// Readiness flags.
    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    /// Whether the Submit control is enabled.
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Current lookup input.
    pub fn lookup_id(&self) -> &str {
        &self.lookup_id
    }

    /// Latest reservation answer.
    pub fn reservation_notice(&self) -> Option<&ReservationNotice> {
        self.reservation.as_ref()
    }

    /// Latest lookup answer.
    pub fn lookup_notice(&self) -> Option<&LookupNotice> {
        self.lookup.as_ref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
