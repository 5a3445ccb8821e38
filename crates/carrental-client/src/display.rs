//! Rendering contract.
//!
//! The client never paints anything itself. Each inbound response is
//! classified into an [`Outcome`], and [`Outcome::dispatch`] makes exactly one
//! call on a [`DisplaySink`]. Negative answers (`available: false`, missing
//! `start`) are ordinary outcomes, not errors.

use carrental_proto::payloads::{lookup::LookupResponse, reservation::ReservationResponse};

use crate::RequestKind;

/// Receiver of classified responses.
///
/// Implemented by the presentation layer. Every call is a pure presentation
/// effect; the client consumes no return value.
pub trait DisplaySink {
    /// A vehicle was reserved.
    fn display_confirmation(&mut self, response: ReservationResponse);

    /// No vehicle matched the request.
    fn display_unavailable(&mut self);

    /// The looked-up reservation exists.
    fn display_lookup_details(&mut self, response: LookupResponse);

    /// The looked-up reservation does not exist.
    fn display_invalid_reservation_id(&mut self);
}

/// Classified result of one inbound response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `available: true`.
    Confirmed(ReservationResponse),
    /// `available: false`. Address fields are never read.
    Unavailable,
    /// Lookup with a non-null `start`.
    Details(LookupResponse),
    /// Lookup with a null or absent `start`.
    InvalidReservationId,
}

impl Outcome {
    /// Classify a reservation response by its `available` flag.
    pub fn from_reservation(response: ReservationResponse) -> Self {
        if response.available { Self::Confirmed(response) } else { Self::Unavailable }
    }

    /// Classify a lookup response by the presence of `start`.
    pub fn from_lookup(response: LookupResponse) -> Self {
        if response.is_found() { Self::Details(response) } else { Self::InvalidReservationId }
    }

    /// Request kind this outcome answers.
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Confirmed(_) | Self::Unavailable => RequestKind::Reservation,
            Self::Details(_) | Self::InvalidReservationId => RequestKind::Lookup,
        }
    }

    /// Hand the outcome to the sink.
    pub fn dispatch<S: DisplaySink + ?Sized>(self, sink: &mut S) {
        match self {
            Self::Confirmed(response) => sink.display_confirmation(response),
            Self::Unavailable => sink.display_unavailable(),
            Self::Details(response) => sink.display_lookup_details(response),
            Self::InvalidReservationId => sink.display_invalid_reservation_id(),
        }
    }
}
