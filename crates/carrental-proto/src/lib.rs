//! Wire protocol for the car rental reservation system.
//!
//! The client and server exchange STOMP 1.2 frames over a single persistent
//! channel. Two destinations carry outbound requests and two carry inbound
//! responses; every body is JSON.
//!
//! # Components
//!
//! - [`Frame`]: text frame (command, headers, body) with encode/decode
//! - [`Command`]: STOMP frame commands
//! - [`Destination`]: the four routes used by the reservation protocol
//! - [`Payload`]: typed JSON bodies bound to their destination
//!
//! The frame layer is structural only. Payload decoding happens separately so
//! that a frame can be routed by destination before its body is parsed.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod destination;
pub mod errors;
mod frame;
pub mod payloads;

pub use command::Command;
pub use destination::Destination;
pub use frame::{Frame, headers};
pub use payloads::Payload;
