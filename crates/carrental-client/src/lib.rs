//! Client
//!
//! Action-based client state machine for the car rental reservation
//! protocol. Manages the channel session, the two response subscriptions and
//! the outstanding reservation and lookup requests.
//!
//! # Architecture
//!
//! The client is Sans-IO. It receives events ([`ClientEvent`]), processes
//! them through pure state machine logic, and returns actions
//! ([`ClientAction`]) for the caller to execute. Decoded responses are
//! classified into an [`Outcome`] which the caller hands to a
//! [`DisplaySink`].
//!
//! # Components
//!
//! - [`Client`]: session, subscriptions and per-kind request state
//! - [`ClientEvent`]: events fed into the client
//! - [`ClientAction`]: actions produced by the client
//! - [`Outcome`] and [`DisplaySink`]: the rendering contract
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::ConnectedClient`]: frame channels backed by a TCP stream
//! - [`transport::connect`]: connect to a server

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod display;
mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use carrental_proto::payloads::{
    lookup::{LookupRequest, LookupResponse},
    reservation::{ReservationRequest, ReservationResponse, VehicleAddress},
};
pub use client::{Client, RequestKind, RequestState, SessionState, Subscription};
pub use display::{DisplaySink, Outcome};
pub use error::ClientError;
pub use event::{ClientAction, ClientEvent, LogLevel};
