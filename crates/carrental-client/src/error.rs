//! Client error types.

use carrental_proto::{Command, Destination, errors::ProtocolError};
use thiserror::Error;

/// Errors returned by [`crate::Client::handle`].
///
/// None of these are fatal to the caller's event loop. A malformed response
/// is reported and the client keeps serving later frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A request was issued before the session was established.
    #[error("not connected")]
    NotConnected,

    /// Outbound frame could not be built.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Inbound body did not match the payload expected on its destination.
    #[error("undecodable response on {destination}: {reason}")]
    Decode {
        /// Destination the message arrived on.
        destination: Destination,
        /// Decoder message.
        reason: String,
    },

    /// MESSAGE frame on a destination the client never subscribed to.
    #[error("message on unexpected destination: {0}")]
    UnexpectedDestination(String),

    /// Frame the server must not send to a client.
    #[error("unexpected {command} frame from server")]
    UnexpectedFrame {
        /// Command of the offending frame.
        command: Command,
    },

    /// Server reported an ERROR and closed the session.
    #[error("server error: {message}")]
    Server {
        /// Server-supplied description.
        message: String,
    },
}

impl ClientError {
    /// Whether the session is gone after this error.
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}
