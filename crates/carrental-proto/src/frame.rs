//! Text frame codec.
//!
//! A `Frame` is the transport-layer packet of the channel:
//!
//! ```text
//! COMMAND\n
//! name:value\n      (zero or more)
//! \n
//! body\0
//! ```
//!
//! This is a pure data holder (command + headers + raw body). For typed
//! bodies, see `Payload::into_frame()` and `Payload::from_frame()`.

use std::fmt::Write as _;

use bytes::{BufMut, Bytes};

use crate::{
    Command,
    errors::{ProtocolError, Result},
};

/// Well-known header names.
pub mod headers {
    /// Target or origin of a SEND/MESSAGE/SUBSCRIBE frame.
    pub const DESTINATION: &str = "destination";
    /// MIME type of the body.
    pub const CONTENT_TYPE: &str = "content-type";
    /// Octet count of the body.
    pub const CONTENT_LENGTH: &str = "content-length";
    /// Subscription id on SUBSCRIBE/UNSUBSCRIBE.
    pub const ID: &str = "id";
    /// Subscription id echoed on MESSAGE.
    pub const SUBSCRIPTION: &str = "subscription";
    /// Server-assigned message id.
    pub const MESSAGE_ID: &str = "message-id";
    /// Short error description on ERROR.
    pub const MESSAGE: &str = "message";
    /// Acknowledgement mode on SUBSCRIBE.
    pub const ACK: &str = "ack";
    /// Protocol versions offered on CONNECT.
    pub const ACCEPT_VERSION: &str = "accept-version";
    /// Virtual host on CONNECT.
    pub const HOST: &str = "host";
    /// User name on CONNECT.
    pub const LOGIN: &str = "login";
    /// Password on CONNECT.
    pub const PASSCODE: &str = "passcode";
    /// Heart-beat negotiation on CONNECT/CONNECTED.
    pub const HEART_BEAT: &str = "heart-beat";
    /// Negotiated version on CONNECTED.
    pub const VERSION: &str = "version";
    /// Session id on CONNECTED.
    pub const SESSION: &str = "session";
    /// Server identification on CONNECTED.
    pub const SERVER: &str = "server";
    /// Receipt request on any client frame.
    pub const RECEIPT: &str = "receipt";
    /// Receipt id on RECEIPT.
    pub const RECEIPT_ID: &str = "receipt-id";
}

/// Complete protocol frame.
///
/// Holds the raw body bytes, NOT a typed payload, so frames can be routed by
/// destination without parsing JSON.
///
/// # Invariants
///
/// - Header order is preserved. When a header name repeats, the first
///   occurrence wins on lookup.
/// - Body size MUST NOT exceed [`Frame::MAX_BODY_SIZE`]. Violations are
///   rejected by [`Frame::encode`] and [`Frame::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame command.
    pub command: Command,

    /// Headers in wire order (unescaped).
    pub headers: Vec<(String, String)>,

    /// Raw body bytes.
    pub body: Bytes,
}

impl Frame {
    /// Largest accepted body (1 MiB). Reservation payloads are a few hundred
    /// bytes.
    pub const MAX_BODY_SIZE: usize = 1024 * 1024;

    /// Frame terminator.
    pub const TERMINATOR: u8 = 0;

    /// Create a frame with no headers and an empty body.
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self { command, headers: Vec::new(), body: Bytes::new() }
    }

    /// Append a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Value of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Value of a header the caller cannot proceed without.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::MissingHeader` if the header is absent
    pub fn require_header(&self, name: &'static str) -> Result<&str> {
        self.header(name).ok_or(ProtocolError::MissingHeader { name })
    }

    /// Destination header, if any.
    pub fn destination(&self) -> Option<&str> {
        self.header(headers::DESTINATION)
    }

    /// Encode the frame, terminator included.
    ///
    /// A `content-length` header is added for non-empty bodies unless the
    /// caller already set one.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::PayloadTooLarge` if the body exceeds
    ///   [`Frame::MAX_BODY_SIZE`]
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        if self.body.len() > Self::MAX_BODY_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                size: self.body.len(),
                max: Self::MAX_BODY_SIZE,
            });
        }

        let escape = self.command.escapes_headers();
        let mut head = String::with_capacity(64);
        head.push_str(self.command.as_str());
        head.push('\n');

        for (name, value) in &self.headers {
            if escape {
                escape_into(&mut head, name);
                head.push(':');
                escape_into(&mut head, value);
            } else {
                head.push_str(name);
                head.push(':');
                head.push_str(value);
            }
            head.push('\n');
        }

        if !self.body.is_empty() && self.header(headers::CONTENT_LENGTH).is_none() {
            // Writing to a String cannot fail.
            let _ = writeln!(head, "{}:{}", headers::CONTENT_LENGTH, self.body.len());
        }
        head.push('\n');

        dst.put_slice(head.as_bytes());
        dst.put_slice(&self.body);
        dst.put_u8(Self::TERMINATOR);

        Ok(())
    }

    /// Decode one frame from wire bytes.
    ///
    /// Leading end-of-line bytes (heart-beats) are skipped. Lines may end in
    /// `\n` or `\r\n`. Bytes after the terminator are ignored.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTruncated` if the head or terminator is missing
    /// - `ProtocolError::BodyTruncated` if `content-length` overshoots
    /// - `ProtocolError::UnknownCommand` for an unrecognized first line
    /// - `ProtocolError::MalformedHeader` for lines without `:`, bad escapes
    ///   or a non-numeric `content-length`
    /// - `ProtocolError::InvalidUtf8` if the head is not UTF-8
    /// - `ProtocolError::PayloadTooLarge` if the body exceeds the limit
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut pos = bytes.iter().take_while(|b| **b == b'\n' || **b == b'\r').count();

        let command_line = next_line(bytes, &mut pos)?;
        let command: Command = command_line.parse()?;
        let escaped = command.escapes_headers();

        let mut frame_headers = Vec::new();
        loop {
            let line = next_line(bytes, &mut pos)?;
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ProtocolError::MalformedHeader(line.to_string()))?;
            let header = if escaped {
                (unescape(name, line)?, unescape(value, line)?)
            } else {
                (name.to_string(), value.to_string())
            };
            frame_headers.push(header);
        }

        let content_length = frame_headers
            .iter()
            .find(|(n, _)| n == headers::CONTENT_LENGTH)
            .map(|(_, v)| {
                v.trim().parse::<usize>().map_err(|_| ProtocolError::MalformedHeader(v.clone()))
            })
            .transpose()?;

        let rest = bytes.get(pos..).unwrap_or_default();
        let body = match content_length {
            Some(len) => {
                if len > Self::MAX_BODY_SIZE {
                    return Err(ProtocolError::PayloadTooLarge {
                        size: len,
                        max: Self::MAX_BODY_SIZE,
                    });
                }
                let body = rest
                    .get(..len)
                    .ok_or(ProtocolError::BodyTruncated { expected: len, actual: rest.len() })?;
                if rest.get(len) != Some(&Self::TERMINATOR) {
                    return Err(ProtocolError::FrameTruncated { consumed: bytes.len() });
                }
                body
            },
            None => {
                let end = rest
                    .iter()
                    .position(|b| *b == Self::TERMINATOR)
                    .ok_or(ProtocolError::FrameTruncated { consumed: bytes.len() })?;
                if end > Self::MAX_BODY_SIZE {
                    return Err(ProtocolError::PayloadTooLarge {
                        size: end,
                        max: Self::MAX_BODY_SIZE,
                    });
                }
                rest.get(..end).unwrap_or_default()
            },
        };

        Ok(Self { command, headers: frame_headers, body: Bytes::copy_from_slice(body) })
    }
}

/// Read one line starting at `pos`, advancing past its `\n`.
fn next_line<'a>(bytes: &'a [u8], pos: &mut usize) -> Result<&'a str> {
    let rest = bytes.get(*pos..).unwrap_or_default();
    let end = rest
        .iter()
        .position(|b| *b == b'\n')
        .ok_or(ProtocolError::FrameTruncated { consumed: bytes.len() })?;
    let raw = rest.get(..end).unwrap_or_default();
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    *pos += end + 1;
    std::str::from_utf8(raw).map_err(|_| ProtocolError::InvalidUtf8)
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
}

fn unescape(s: &str, line: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            _ => return Err(ProtocolError::MalformedHeader(line.to_string())),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn arbitrary_command() -> impl Strategy<Value = Command> {
        prop::sample::select(Command::ALL.to_vec())
    }

    prop_compose! {
        fn arbitrary_frame()(
            command in arbitrary_command(),
            header_list in prop::collection::vec(("[a-z-]{1,12}", "[ -~]{0,24}"), 0..6),
            body in "[ -~]{0,256}",
        ) -> Frame {
            let headers = header_list
                .into_iter()
                .filter(|(name, _)| name != headers::CONTENT_LENGTH)
                .collect();
            Frame { command, headers, body: Bytes::from(body) }
        }
    }

    proptest! {
        #[test]
        fn frame_round_trip(frame in arbitrary_frame()) {
            let mut wire = Vec::new();
            frame.encode(&mut wire).expect("should encode");

            let parsed = Frame::decode(&wire).expect("should decode");
            prop_assert_eq!(parsed.command, frame.command);
            prop_assert_eq!(parsed.body, frame.body.clone());
            let original: Vec<_> = frame.headers.clone();
            let decoded: Vec<_> = parsed
                .headers
                .into_iter()
                .filter(|(name, _)| name != headers::CONTENT_LENGTH)
                .collect();
            prop_assert_eq!(decoded, original);
        }
    }

    #[test]
    fn encode_adds_content_length() {
        let frame = Frame::new(Command::Send)
            .with_header(headers::DESTINATION, "/app/lookup")
            .with_body(r#"{"reservationId":"R1"}"#);

        let mut wire = Vec::new();
        frame.encode(&mut wire).expect("should encode");

        let text = String::from_utf8(wire).expect("utf8");
        assert_eq!(
            text,
            "SEND\ndestination:/app/lookup\ncontent-length:22\n\n{\"reservationId\":\"R1\"}\0"
        );
    }

    #[test]
    fn decode_server_message() {
        let wire = b"MESSAGE\r\ndestination:/reservation/request\r\nsubscription:sub-0\r\nmessage-id:7\r\n\r\n{\"available\":false}\0";

        let frame = Frame::decode(wire).expect("should decode");
        assert_eq!(frame.command, Command::Message);
        assert_eq!(frame.destination(), Some("/reservation/request"));
        assert_eq!(frame.header(headers::SUBSCRIPTION), Some("sub-0"));
        assert_eq!(frame.body, Bytes::from_static(b"{\"available\":false}"));
    }

    #[test]
    fn decode_skips_heartbeats() {
        let wire = b"\n\n\r\nRECEIPT\nreceipt-id:1\n\n\0";
        let frame = Frame::decode(wire).expect("should decode");
        assert_eq!(frame.command, Command::Receipt);
        assert!(frame.body.is_empty());
    }

    #[test]
    fn escaped_header_values_round_trip() {
        let frame = Frame::new(Command::Error).with_header(headers::MESSAGE, "bad: line\\two\nend");

        let mut wire = Vec::new();
        frame.encode(&mut wire).expect("should encode");
        let text = String::from_utf8(wire.clone()).expect("utf8");
        assert!(text.contains("message:bad\\c line\\\\two\\nend\n"));

        let parsed = Frame::decode(&wire).expect("should decode");
        assert_eq!(parsed.header(headers::MESSAGE), Some("bad: line\\two\nend"));
    }

    #[test]
    fn connect_headers_not_escaped() {
        let frame = Frame::new(Command::Connect).with_header(headers::HOST, "a:b");
        let mut wire = Vec::new();
        frame.encode(&mut wire).expect("should encode");
        assert_eq!(wire, b"CONNECT\nhost:a:b\n\n\0");

        let parsed = Frame::decode(&wire).expect("should decode");
        assert_eq!(parsed.header(headers::HOST), Some("a:b"));
    }

    #[test]
    fn first_repeated_header_wins() {
        let wire = b"MESSAGE\ndestination:/a\ndestination:/b\n\n\0";
        let frame = Frame::decode(wire).expect("should decode");
        assert_eq!(frame.destination(), Some("/a"));
    }

    #[test]
    fn reject_missing_terminator() {
        let result = Frame::decode(b"MESSAGE\ndestination:/a\n\n{}");
        assert!(matches!(result, Err(ProtocolError::FrameTruncated { .. })));
    }

    #[test]
    fn reject_truncated_body() {
        let result = Frame::decode(b"MESSAGE\ncontent-length:100\n\n{}\0");
        assert!(matches!(result, Err(ProtocolError::BodyTruncated { expected: 100, actual: 3 })));
    }

    #[test]
    fn reject_header_without_colon() {
        let result = Frame::decode(b"MESSAGE\ndestination\n\n\0");
        assert!(matches!(result, Err(ProtocolError::MalformedHeader(_))));
    }

    #[test]
    fn reject_bad_escape() {
        let result = Frame::decode(b"MESSAGE\nmessage:a\\tb\n\n\0");
        assert!(matches!(result, Err(ProtocolError::MalformedHeader(_))));
    }

    #[test]
    fn reject_oversized_body() {
        let frame = Frame::new(Command::Send).with_body(vec![b'x'; Frame::MAX_BODY_SIZE + 1]);
        let mut wire = Vec::new();
        assert!(matches!(frame.encode(&mut wire), Err(ProtocolError::PayloadTooLarge { .. })));
    }

    #[test]
    fn content_length_allows_nul_in_body() {
        let wire = b"MESSAGE\ncontent-length:3\n\na\0b\0";
        let frame = Frame::decode(wire).expect("should decode");
        assert_eq!(frame.body, Bytes::from_static(b"a\0b"));
    }
}
