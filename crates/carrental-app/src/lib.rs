//! Application layer for the car rental client
//!
//! Pure state machines and generic runtime for the reservation form and the
//! protocol orchestration behind it. The same code runs under the terminal
//! frontend and under the scripted drivers used in tests.
//!
//! # Components
//!
//! - [`RequestGate`]: field readiness flags guarding reservation submission
//! - [`App`]: UI state machine (form values, focus, result notices)
//! - [`FormInput`]: key handling and focus navigation
//! - [`Bridge`]: Protocol bridge (translates App actions to Client events)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod card;

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod form;
mod gate;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::Bridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use form::ReservationForm;
pub use gate::{FormField, RequestGate};
pub use input::{Focus, FormInput, KeyInput};
pub use runtime::{Runtime, SessionConfig};
pub use state::{ConnectionState, LookupNotice, ReservationNotice};
