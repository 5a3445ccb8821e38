//! Terminal UI for the car rental client
//!
//! A thin shell over [`carrental_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`carrental_app::Runtime`].
//!
//! This crate only handles configuration, logging setup and terminal
//! rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod terminal;
pub mod ui;

pub use carrental_app::{App, AppAction, AppEvent, Bridge, Driver, FormInput, KeyInput, Runtime};
pub use config::ClientConfig;
pub use terminal::{TerminalDriver, TerminalError};

/// Run the terminal client until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, the server cannot be
/// reached or a frame cannot be handed to the transport.
pub async fn run(config: ClientConfig) -> Result<(), TerminalError> {
    let session = config.session();
    let driver = TerminalDriver::new(config.server_addr.clone())?;
    Runtime::new(driver, config.server_addr, session).run().await
}
