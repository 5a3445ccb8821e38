//! JSON-encoded protocol messages.
//!
//! Frames are plain text, and bodies are JSON objects with camelCase keys.
//! The payload type is determined by the frame's `destination` header, so
//! bodies carry no type tag.
//!
//! # Invariants
//!
//! Each payload variant maps to exactly one destination (enforced by match
//! exhaustiveness). Outbound variants travel in SEND frames, inbound variants
//! in MESSAGE frames.

pub mod lookup;
pub mod reservation;

use bytes::BufMut;

use crate::{
    Command, Destination, Frame,
    errors::{ProtocolError, Result},
    frame::headers,
};

/// Content type of every payload body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// All possible frame bodies.
///
/// Only the inner struct is serialized. The destination already identifies
/// the payload type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// New reservation request (client to server).
    ReservationRequest(reservation::ReservationRequest),
    /// Availability answer (server to client).
    ReservationResponse(reservation::ReservationResponse),
    /// Reservation lookup (client to server).
    LookupRequest(lookup::LookupRequest),
    /// Lookup answer (server to client).
    LookupResponse(lookup::LookupResponse),
}

impl Payload {
    /// Destination this payload is published on.
    #[must_use]
    pub const fn destination(&self) -> Destination {
        match self {
            Self::ReservationRequest(_) => Destination::ReservationRequest,
            Self::ReservationResponse(_) => Destination::ReservationResponse,
            Self::LookupRequest(_) => Destination::LookupRequest,
            Self::LookupResponse(_) => Destination::LookupResponse,
        }
    }

    /// Encode payload to buffer as JSON.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::JsonEncode` if serialization fails
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let writer = dst.writer();

        match self {
            Self::ReservationRequest(inner) => serde_json::to_writer(writer, inner),
            Self::ReservationResponse(inner) => serde_json::to_writer(writer, inner),
            Self::LookupRequest(inner) => serde_json::to_writer(writer, inner),
            Self::LookupResponse(inner) => serde_json::to_writer(writer, inner),
        }
        .map_err(|e| ProtocolError::JsonEncode(e.to_string()))
    }

    /// Decode payload from bytes based on destination.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::PayloadTooLarge` if bytes exceed
    ///   [`Frame::MAX_BODY_SIZE`]
    /// - `ProtocolError::JsonDecode` if JSON deserialization fails
    pub fn decode(destination: Destination, bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Frame::MAX_BODY_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                size: bytes.len(),
                max: Frame::MAX_BODY_SIZE,
            });
        }

        let payload = match destination {
            Destination::ReservationRequest => Self::ReservationRequest(from_json(bytes)?),
            Destination::ReservationResponse => Self::ReservationResponse(from_json(bytes)?),
            Destination::LookupRequest => Self::LookupRequest(from_json(bytes)?),
            Destination::LookupResponse => Self::LookupResponse(from_json(bytes)?),
        };

        Ok(payload)
    }

    /// Convert payload into a transport frame.
    ///
    /// Outbound payloads become SEND frames and inbound payloads become
    /// MESSAGE frames. Both carry `destination` and `content-type` headers.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::JsonEncode` if serialization fails
    pub fn into_frame(self) -> Result<Frame> {
        let destination = self.destination();
        let command = if destination.is_inbound() { Command::Message } else { Command::Send };

        let mut body = Vec::new();
        self.encode(&mut body)?;

        Ok(Frame::new(command)
            .with_header(headers::DESTINATION, destination.path())
            .with_header(headers::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .with_body(body))
    }

    /// Parse payload from a transport frame.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::MissingHeader` if the frame has no destination
    /// - `ProtocolError::UnknownDestination` if the destination is not a
    ///   reservation route
    /// - `ProtocolError::JsonDecode` if the body does not match
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let destination: Destination = frame.require_header(headers::DESTINATION)?.parse()?;
        Self::decode(destination, &frame.body)
    }
}

fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| ProtocolError::JsonDecode(e.to_string()))
}

/// Lenient text fields.
///
/// Identifiers, street numbers, zip codes and dates may arrive as JSON
/// strings or numbers depending on the server's serializer. Both are held as
/// text on the client.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    fn to_text<E: Error>(value: Value) -> Result<Option<String>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Array(_) | Value::Object(_) => {
                Err(E::custom("expected a string or number, found a JSON container"))
            },
        }
    }

    /// Required text field.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        to_text(Value::deserialize(d)?)?.ok_or_else(|| D::Error::custom("unexpected null"))
    }

    /// Optional text field; `null` maps to `None`.
    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        to_text(Value::deserialize(d)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{lookup::LookupRequest, *};

    #[test]
    fn outbound_payload_becomes_send_frame() {
        let payload = Payload::LookupRequest(LookupRequest { reservation_id: "R1".into() });
        let frame = payload.into_frame().expect("should create frame");

        assert_eq!(frame.command, Command::Send);
        assert_eq!(frame.destination(), Some("/app/lookup"));
        assert_eq!(frame.header(headers::CONTENT_TYPE), Some(JSON_CONTENT_TYPE));
        assert_eq!(&frame.body[..], br#"{"reservationId":"R1"}"#);
    }

    #[test]
    fn inbound_payload_becomes_message_frame() {
        let payload = Payload::ReservationResponse(reservation::ReservationResponse::unavailable());
        let frame = payload.clone().into_frame().expect("should create frame");

        assert_eq!(frame.command, Command::Message);
        assert_eq!(frame.destination(), Some("/reservation/request"));
        assert_eq!(Payload::from_frame(&frame).expect("should parse"), payload);
    }

    #[test]
    fn from_frame_requires_destination() {
        let frame = Frame::new(Command::Message).with_body("{}");
        assert_eq!(
            Payload::from_frame(&frame),
            Err(ProtocolError::MissingHeader { name: headers::DESTINATION })
        );
    }

    #[test]
    fn from_frame_rejects_unknown_destination() {
        let frame = Frame::new(Command::Message)
            .with_header(headers::DESTINATION, "/topic/news")
            .with_body("{}");
        assert!(matches!(Payload::from_frame(&frame), Err(ProtocolError::UnknownDestination(_))));
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let result = Payload::decode(Destination::ReservationResponse, b"{\"available\":");
        assert!(matches!(result, Err(ProtocolError::JsonDecode(_))));
    }
}
