//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Network uses the client's
//! TCP transport.

use std::io::{self, Stdout, stdout};

use carrental_app::{App, AppAction, AppEvent, Driver, FormInput, KeyInput};
use carrental_client::transport::{self, ConnectedClient, TransportError};
use carrental_proto::Frame;
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,

    /// No open connection to send on.
    #[error("not connected to server")]
    NotConnected,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the broker
/// connection. Owns the focus state for the form.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    connection: Option<ConnectedClient>,
    server_addr: String,
    input: FormInput,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    ///
    /// Switches the terminal into raw mode on the alternate screen. The
    /// terminal is restored when the driver is dropped.
    pub fn new(server_addr: String) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, connection: None, server_addr, input: FormInput::new() })
    }

    /// Convert a crossterm key event to `KeyInput`.
    ///
    /// Ctrl+C quits like Esc, since raw mode swallows the signal.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(KeyInput::Esc);
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::BackTab => Some(KeyInput::BackTab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        match Self::convert_key(key_event) {
                            Some(key_input) => Ok(self.input.handle_key(key_input, app)),
                            None => Ok(vec![]),
                        }
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(app.handle(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(vec![]),
                }
            }

            // Tick so server frames are drained while the user is idle
            () = tokio::time::sleep(timeout) => {
                Ok(app.handle(AppEvent::Tick))
            }
        }
    }

    async fn send_frame(&mut self, frame: Frame) -> Result<(), Self::Error> {
        let conn = self.connection.as_ref().ok_or(TerminalError::NotConnected)?;
        if conn.to_server.send(frame).await.is_err() {
            self.stop();
            self.connection = None;
            return Err(TerminalError::ChannelSend);
        }
        Ok(())
    }

    async fn recv_frame(&mut self) -> Option<Frame> {
        let conn = self.connection.as_mut()?;
        match conn.from_server.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::info!("Server closed the connection");
                self.stop();
                self.connection = None;
                None
            },
        }
    }

    async fn connect(&mut self, _addr: &str) -> Result<(), Self::Error> {
        let client = transport::connect(&self.server_addr).await?;
        self.connection = Some(client);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app, &self.input);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(ref conn) = self.connection {
            conn.stop();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn navigation_keys_convert() {
        assert_eq!(
            TerminalDriver::convert_key(press(KeyCode::Tab, KeyModifiers::NONE)),
            Some(KeyInput::Tab)
        );
        assert_eq!(
            TerminalDriver::convert_key(press(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(KeyInput::BackTab)
        );
        assert_eq!(
            TerminalDriver::convert_key(press(KeyCode::Char('7'), KeyModifiers::NONE)),
            Some(KeyInput::Char('7'))
        );
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            TerminalDriver::convert_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyInput::Esc)
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(TerminalDriver::convert_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);
        assert_eq!(TerminalDriver::convert_key(press(KeyCode::Left, KeyModifiers::NONE)), None);
    }
}
