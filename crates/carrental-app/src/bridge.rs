//! Protocol-to-Application translation layer.
//!
//! The [`Bridge`] wraps the low-level [`carrental_client::Client`] and adapts
//! it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`] into client events.
//! - Accumulates outgoing [`carrental_proto::Frame`] to be sent by the driver
//!   in the next I/O cycle.
//! - Routes classified responses through the [`DisplaySink`] contract and
//!   turns them into [`crate::AppEvent`]s to update the UI.
//! - Logs client errors and reports them to the App instead of failing.

use carrental_client::{
    Client, ClientAction, ClientError, ClientEvent, DisplaySink, LogLevel, LookupResponse,
    ReservationResponse,
};
use carrental_proto::Frame;

use crate::{AppAction, AppEvent, SessionConfig};

/// Bridge between App and Client protocol logic.
#[derive(Debug, Default)]
pub struct Bridge {
    client: Client,
    outgoing: Vec<Frame>,
}

impl Bridge {
    /// Create a new Bridge with a disconnected client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying protocol client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Start the session handshake.
    pub fn connect(&mut self, config: &SessionConfig) -> Vec<AppEvent> {
        let result = self.client.handle(ClientEvent::Connect {
            host: config.host.clone(),
            login: config.login.clone(),
            passcode: config.passcode.clone(),
        });
        self.handle_client_result(result)
    }

    /// End the session.
    pub fn disconnect(&mut self) -> Vec<AppEvent> {
        let result = self.client.handle(ClientEvent::Disconnect);
        self.handle_client_result(result)
    }

    /// Drop the session after the transport closed underneath it.
    ///
    /// The client returns to `Disconnected` so later requests fail with
    /// [`ClientError::NotConnected`]. Frames queued for the dead link are
    /// discarded.
    pub fn link_lost(&mut self) -> Vec<AppEvent> {
        let events = self.disconnect();
        self.outgoing.clear();
        events
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::SendReservation(request) => {
                let result = self.client.handle(ClientEvent::SendReservation(request));
                self.handle_client_result(result)
            },
            AppAction::LookupReservation { reservation_id } => {
                let result = self.client.handle(ClientEvent::SendLookup { reservation_id });
                self.handle_client_result(result)
            },
            AppAction::Render | AppAction::Quit | AppAction::Connect { .. } => vec![],
        }
    }

    /// Handle a frame from the server.
    pub fn handle_frame(&mut self, frame: Frame) -> Vec<AppEvent> {
        let result = self.client.handle(ClientEvent::FrameReceived(frame));
        self.handle_client_result(result)
    }

    /// Take pending outgoing frames.
    pub fn take_outgoing(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.outgoing)
    }

    fn handle_client_result(
        &mut self,
        result: Result<Vec<ClientAction>, ClientError>,
    ) -> Vec<AppEvent> {
        match result {
            Ok(actions) => self.process_client_actions(actions),
            Err(e) if e.ends_session() => {
                tracing::error!(error = %e, "session ended by server");
                vec![AppEvent::Disconnected { reason: e.to_string() }]
            },
            Err(e) => {
                tracing::warn!(error = %e, "client error");
                vec![AppEvent::Error { message: e.to_string() }]
            },
        }
    }

    fn process_client_actions(&mut self, actions: Vec<ClientAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                ClientAction::Send(frame) => {
                    self.outgoing.push(frame);
                },
                ClientAction::Connected { version, session, server } => {
                    tracing::info!(?version, ?session, ?server, "session established");
                    events.push(AppEvent::Connected { session });
                },
                ClientAction::Display(outcome) => {
                    outcome.dispatch(&mut EventSink { events: &mut events });
                },
                ClientAction::Log { level, message } => match level {
                    LogLevel::Debug => tracing::debug!("{message}"),
                    LogLevel::Info => tracing::info!("{message}"),
                    LogLevel::Warn => tracing::warn!("{message}"),
                },
            }
        }

        events
    }
}

/// Display sink that queues App events.
struct EventSink<'a> {
    events: &'a mut Vec<AppEvent>,
}

impl DisplaySink for EventSink<'_> {
    fn display_confirmation(&mut self, response: ReservationResponse) {
        self.events.push(AppEvent::ReservationConfirmed(response));
    }

    fn display_unavailable(&mut self) {
        self.events.push(AppEvent::ReservationUnavailable);
    }

    fn display_lookup_details(&mut self, response: LookupResponse) {
        self.events.push(AppEvent::LookupDetails(response));
    }

    fn display_invalid_reservation_id(&mut self) {
        self.events.push(AppEvent::InvalidReservationId);
    }
}
