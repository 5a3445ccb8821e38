//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use carrental_proto::Frame;

use crate::{App, AppAction};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal frontend and in tests.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, tokio TCP for the channel
/// - **Tests**: scripted keys and an in-memory fake broker
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input and apply it to `app`.
    ///
    /// Returns the actions the input produced, or an empty list if nothing
    /// happened before the driver's poll interval elapsed.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Send a frame to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no connection or the send fails. The
    /// runtime treats any error as loss of the link.
    fn send_frame(&mut self, frame: Frame) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receive a frame from the server without waiting.
    ///
    /// Returns `None` when no frame is ready. A driver that finds the
    /// channel closed also reports `false` from [`Driver::is_connected`].
    fn recv_frame(&mut self) -> impl Future<Output = Option<Frame>> + Send;

    /// Establish connection to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if connection cannot be established.
    fn connect(&mut self, addr: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Check if connected to server.
    fn is_connected(&self) -> bool;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
