//! Client events and actions.

use carrental_proto::{Frame, payloads::reservation::ReservationRequest};

use crate::display::Outcome;

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Receiving frames from the channel
/// - Forwarding application intents (reserve, look up, disconnect)
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Open the session.
    Connect {
        /// Virtual host announced in CONNECT.
        host: String,
        /// Optional broker login.
        login: Option<String>,
        /// Optional broker passcode.
        passcode: Option<String>,
    },

    /// Frame received from server.
    FrameReceived(Frame),

    /// Application wants to reserve a vehicle.
    ///
    /// The request is sent as given. Completeness is the caller's concern.
    SendReservation(ReservationRequest),

    /// Application wants to look up a reservation.
    SendLookup {
        /// Identifier to look up. May be empty.
        reservation_id: String,
    },

    /// Close the session.
    Disconnect,
}

/// Severity of a [`ClientAction::Log`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    Info,
    /// Something the operator should look at.
    Warn,
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientAction {
    /// Send a frame to the server.
    Send(Frame),

    /// Session established.
    Connected {
        /// Protocol version the server picked.
        version: Option<String>,
        /// Server-assigned session id.
        session: Option<String>,
        /// Server product string.
        server: Option<String>,
    },

    /// Render a classified response.
    Display(Outcome),

    /// Log message for debugging.
    Log {
        /// Severity.
        level: LogLevel,
        /// Log message.
        message: String,
    },
}
