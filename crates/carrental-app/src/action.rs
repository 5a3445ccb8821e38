//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use carrental_client::ReservationRequest;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Connect to server.
    Connect {
        /// Server address (host:port).
        server_addr: String,
    },

    /// Publish a reservation request.
    SendReservation(ReservationRequest),

    /// Publish a lookup request.
    LookupReservation {
        /// Identifier as typed. May be empty.
        reservation_id: String,
    },
}
