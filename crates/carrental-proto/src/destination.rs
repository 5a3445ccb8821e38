//! Destinations used by the reservation protocol.

use std::{fmt, str::FromStr};

use crate::errors::ProtocolError;

/// Named route on the channel.
///
/// Requests are published to the `/app/...` destinations and handled by the
/// server application; responses are broadcast on the `/reservation/...`
/// destinations the client subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Outbound new-reservation requests.
    ReservationRequest,
    /// Outbound reservation lookups.
    LookupRequest,
    /// Inbound availability confirmations.
    ReservationResponse,
    /// Inbound lookup results.
    LookupResponse,
}

impl Destination {
    /// Destinations the client subscribes to, in subscription order.
    pub const INBOUND: [Self; 2] = [Self::ReservationResponse, Self::LookupResponse];

    /// Destinations the client publishes to.
    pub const OUTBOUND: [Self; 2] = [Self::ReservationRequest, Self::LookupRequest];

    /// Wire path of the destination.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ReservationRequest => "/app/request",
            Self::LookupRequest => "/app/lookup",
            Self::ReservationResponse => "/reservation/request",
            Self::LookupResponse => "/reservation/lookup",
        }
    }

    /// True for destinations the server publishes to.
    #[must_use]
    pub const fn is_inbound(self) -> bool {
        matches!(self, Self::ReservationResponse | Self::LookupResponse)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Destination {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::INBOUND
            .into_iter()
            .chain(Self::OUTBOUND)
            .find(|d| d.path() == s)
            .ok_or_else(|| ProtocolError::UnknownDestination(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_server_routes() {
        assert_eq!(Destination::ReservationRequest.path(), "/app/request");
        assert_eq!(Destination::LookupRequest.path(), "/app/lookup");
        assert_eq!(Destination::ReservationResponse.path(), "/reservation/request");
        assert_eq!(Destination::LookupResponse.path(), "/reservation/lookup");
    }

    #[test]
    fn parse_inbound_and_outbound() {
        for d in Destination::INBOUND {
            assert!(d.is_inbound());
            assert_eq!(d.path().parse::<Destination>(), Ok(d));
        }
        for d in Destination::OUTBOUND {
            assert!(!d.is_inbound());
            assert_eq!(d.path().parse::<Destination>(), Ok(d));
        }
    }

    #[test]
    fn unknown_path_rejected() {
        assert!("/topic/other".parse::<Destination>().is_err());
    }
}
