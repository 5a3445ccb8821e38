//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - Terminal notifications (Resize, Tick). Keys go through
//!   [`crate::FormInput`].
//! - Protocol notifications translated from the underlying client.

use carrental_client::{LookupResponse, ReservationResponse};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Transport open, handshake in progress.
    Connecting,

    /// Session established.
    Connected {
        /// Server-assigned session id.
        session: Option<String>,
    },

    /// Session or transport lost.
    Disconnected {
        /// Why the session ended.
        reason: String,
    },

    /// A vehicle was reserved.
    ReservationConfirmed(ReservationResponse),

    /// No vehicle matched the reservation request.
    ReservationUnavailable,

    /// Lookup found the reservation.
    LookupDetails(LookupResponse),

    /// Lookup found nothing.
    InvalidReservationId,

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
