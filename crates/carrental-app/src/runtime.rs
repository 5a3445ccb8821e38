//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Protocol bridge to Client
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Session parameters sent in the CONNECT frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Virtual host.
    pub host: String,
    /// Optional broker login.
    pub login: Option<String>,
    /// Optional broker passcode.
    pub passcode: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { host: "localhost".to_owned(), login: None, passcode: None }
    }
}

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    bridge: Bridge,
    server_addr: String,
    session: SessionConfig,
    /// Whether the driver reported a live link on the previous cycle.
    link_up: bool,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver.
    pub fn new(driver: D, server_addr: String, session: SessionConfig) -> Self {
        let app = App::new(server_addr.clone());
        Self { driver, app, bridge: Bridge::new(), server_addr, session, link_up: false }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Polls for input events from the driver
    /// 2. Receives frames from the server
    /// 3. Processes actions and events between App and Bridge
    /// 4. Sends outgoing frames through the driver
    ///
    /// On quit the session is closed with DISCONNECT before the driver stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.connect();
        let mut quit = self.process_actions(actions).await?;

        while !quit {
            quit = self.process_cycle().await?;
        }

        self.shutdown().await;
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if !actions.is_empty() && self.process_actions(actions).await? {
            return Ok(true);
        }

        while self.driver.is_connected()
            && let Some(frame) = self.driver.recv_frame().await
        {
            tracing::debug!(command = %frame.command, "frame from server");
            let events = self.bridge.handle_frame(frame);
            self.send_outgoing_frames().await;
            if self.process_bridge_events(events).await? {
                return Ok(true);
            }
        }

        if self.link_up && !self.driver.is_connected() {
            self.link_lost("connection closed by server".to_owned());
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Connect { server_addr: _ } => {
                        self.connect().await?;
                    },

                    // Protocol operations go through the bridge
                    AppAction::SendReservation(_) | AppAction::LookupReservation { .. } => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            let new_actions = self.app.handle(event);
                            pending_actions.extend(new_actions);
                        }
                        self.send_outgoing_frames().await;
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process actions synchronously (for use in sync contexts).
    fn process_actions_sync(&mut self, actions: Vec<AppAction>) {
        for action in actions {
            match action {
                AppAction::Render => {
                    if let Err(e) = self.driver.render(&self.app) {
                        tracing::warn!("Failed to render: {:?}", e);
                    }
                },
                AppAction::Quit => {},

                // Protocol actions shouldn't happen in sync contexts
                AppAction::Connect { .. }
                | AppAction::SendReservation(_)
                | AppAction::LookupReservation { .. } => {
                    tracing::warn!("Unexpected protocol action in sync context: {:?}", action);
                },
            }
        }
    }

    /// Process events from Bridge back to App.
    async fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Open the transport and send CONNECT.
    async fn connect(&mut self) -> Result<(), D::Error> {
        tracing::info!(server = %self.server_addr, host = %self.session.host, "connecting");
        self.driver.connect(&self.server_addr).await?;
        self.link_up = true;

        let actions = self.app.handle(AppEvent::Connecting);
        self.process_actions_sync(actions);

        for event in self.bridge.connect(&self.session) {
            let actions = self.app.handle(event);
            self.process_actions_sync(actions);
        }

        self.send_outgoing_frames().await;
        Ok(())
    }

    /// Reset the session after the transport went away and tell the App.
    fn link_lost(&mut self, reason: String) {
        self.link_up = false;
        tracing::warn!(server = %self.server_addr, %reason, "link lost");

        let mut events = self.bridge.link_lost();
        events.push(AppEvent::Disconnected { reason });
        for event in events {
            let actions = self.app.handle(event);
            self.process_actions_sync(actions);
        }
    }

    /// Send DISCONNECT if the link is still up, then stop the driver.
    async fn shutdown(&mut self) {
        for event in self.bridge.disconnect() {
            let actions = self.app.handle(event);
            self.process_actions_sync(actions);
        }

        if self.driver.is_connected() {
            for frame in self.bridge.take_outgoing() {
                if let Err(e) = self.driver.send_frame(frame).await {
                    tracing::warn!(error = %e, "failed to send DISCONNECT");
                }
            }
        }

        self.driver.stop();
    }

    /// Send all pending outgoing frames to the server.
    ///
    /// A failed send means the link is gone: the session is reset and the
    /// remaining frames are dropped.
    async fn send_outgoing_frames(&mut self) {
        let frames = self.bridge.take_outgoing();
        for frame in frames {
            if let Err(e) = self.driver.send_frame(frame).await {
                self.link_lost(format!("send failed: {e}"));
                return;
            }
        }
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
