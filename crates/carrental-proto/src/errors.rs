//! Protocol error types.
//!
//! Errors raised while parsing frames or (de)serializing payloads. These are
//! structural failures of the wire format; protocol-level outcomes such as
//! "no car available" are never errors.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced by the frame codec and payload layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Input ended before the frame terminator.
    #[error("frame truncated: no NUL terminator after {consumed} bytes")]
    FrameTruncated {
        /// Bytes examined before giving up.
        consumed: usize,
    },

    /// Body is shorter than its `content-length` header claims.
    #[error("frame body truncated: expected {expected} bytes, got {actual}")]
    BodyTruncated {
        /// Length claimed by the header.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// First line is not a known STOMP command.
    #[error("unknown frame command: {0:?}")]
    UnknownCommand(String),

    /// Header line without a colon, or with an invalid escape sequence.
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    /// Frame lacks a header its command requires.
    #[error("missing required header: {name}")]
    MissingHeader {
        /// Header name.
        name: &'static str,
    },

    /// Frame is not valid UTF-8 in its command or header section.
    #[error("frame head is not valid UTF-8")]
    InvalidUtf8,

    /// Body exceeds [`crate::Frame::MAX_BODY_SIZE`].
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Actual size.
        size: usize,
        /// Maximum accepted size.
        max: usize,
    },

    /// JSON serialization failed.
    #[error("JSON encode failed: {0}")]
    JsonEncode(String),

    /// JSON deserialization failed.
    #[error("JSON decode failed: {0}")]
    JsonDecode(String),

    /// Destination is not one of the reservation protocol routes.
    #[error("unknown destination: {0}")]
    UnknownDestination(String),
}
