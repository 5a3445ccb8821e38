//! STOMP frame commands.

use std::{fmt, str::FromStr};

use crate::errors::ProtocolError;

/// Frame command (first line of every frame).
///
/// Only the subset of STOMP 1.2 used by the reservation client is modelled.
/// Client frames: `CONNECT`, `SEND`, `SUBSCRIBE`, `UNSUBSCRIBE`, `DISCONNECT`.
/// Server frames: `CONNECTED`, `MESSAGE`, `RECEIPT`, `ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Open a session.
    Connect,
    /// Session accepted by the server.
    Connected,
    /// Publish a body to a destination.
    Send,
    /// Register interest in a destination.
    Subscribe,
    /// Drop a subscription.
    Unsubscribe,
    /// Message delivered on a subscription.
    Message,
    /// Acknowledgement of a frame that requested a receipt.
    Receipt,
    /// Server-side failure; the server closes the session afterwards.
    Error,
    /// Graceful close.
    Disconnect,
}

impl Command {
    /// Every command, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Connect,
        Self::Connected,
        Self::Send,
        Self::Subscribe,
        Self::Unsubscribe,
        Self::Message,
        Self::Receipt,
        Self::Error,
        Self::Disconnect,
    ];

    /// Wire name of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Connected => "CONNECTED",
            Self::Send => "SEND",
            Self::Subscribe => "SUBSCRIBE",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Message => "MESSAGE",
            Self::Receipt => "RECEIPT",
            Self::Error => "ERROR",
            Self::Disconnect => "DISCONNECT",
        }
    }

    /// Whether header values of this command are escaped on the wire.
    ///
    /// STOMP 1.2 exempts `CONNECT` and `CONNECTED` from escaping.
    #[must_use]
    pub const fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Connected)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // STOMP 1.2 allows `STOMP` as an alias for CONNECT.
        if s == "STOMP" {
            return Ok(Self::Connect);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownCommand(s.to_string()))
    }
}
