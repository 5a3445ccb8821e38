//! Runtime tests against a scripted driver.
//!
//! The driver replays a fixed key sequence and answers outbound frames the
//! way a broker with a reservation backend would. Every render is captured
//! so the tests can check what the user would have seen.

use std::{collections::VecDeque, io};

use carrental_app::{
    App, AppAction, ConnectionState, Driver, FormField, FormInput, KeyInput, Runtime,
    SessionConfig,
};
use carrental_proto::{Command, Frame, headers};
use tokio::sync::mpsc;

const DETAILS: &str = r#"{"start":"2024-01-01","end":"2024-01-05","firstName":"A","lastName":"B","manufacturer":"M","model":"S","dailyPrice":50,"streetNumber":"1","streetName":"St","city":"C","state":"S","zipCode":"0"}"#;

const CONFIRMED: &str = r#"{"available":true,"reservationId":"R1","streetNumber":"12","streetName":"Main","city":"X","state":"Y","zipCode":"00001"}"#;

#[derive(Debug, Clone)]
struct Snapshot {
    connection: ConnectionState,
    submit_enabled: bool,
    status: Option<String>,
    reservation: Vec<String>,
    lookup: Vec<String>,
}

impl Snapshot {
    fn of(app: &App) -> Self {
        Self {
            connection: app.connection_state().clone(),
            submit_enabled: app.submit_enabled(),
            status: app.status_message().map(str::to_owned),
            reservation: app.reservation_notice().map(|n| n.lines()).unwrap_or_default(),
            lookup: app.lookup_notice().map(|n| n.lines()).unwrap_or_default(),
        }
    }
}

struct ScriptedDriver {
    keys: VecDeque<KeyInput>,
    input: FormInput,
    connected: bool,
    polls: usize,
    /// Poll on which the broker closes the connection.
    drop_link_at: Option<usize>,
    inbound: VecDeque<Frame>,
    sent: mpsc::UnboundedSender<Frame>,
    renders: mpsc::UnboundedSender<Snapshot>,
}

struct Recording {
    sent: mpsc::UnboundedReceiver<Frame>,
    renders: mpsc::UnboundedReceiver<Snapshot>,
}

impl Recording {
    fn frames(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.sent.try_recv() {
            frames.push(frame);
        }
        frames
    }

    fn snapshots(&mut self) -> Vec<Snapshot> {
        let mut snapshots = Vec::new();
        while let Ok(snapshot) = self.renders.try_recv() {
            snapshots.push(snapshot);
        }
        snapshots
    }
}

fn scripted(keys: impl IntoIterator<Item = KeyInput>) -> (ScriptedDriver, Recording) {
    let (sent_tx, sent_rx) = mpsc::unbounded_channel();
    let (render_tx, render_rx) = mpsc::unbounded_channel();

    let driver = ScriptedDriver {
        keys: keys.into_iter().collect(),
        input: FormInput::new(),
        connected: false,
        polls: 0,
        drop_link_at: None,
        inbound: VecDeque::new(),
        sent: sent_tx,
        renders: render_tx,
    };

    (driver, Recording { sent: sent_rx, renders: render_rx })
}

fn reply(destination: &str, body: &str) -> Frame {
    Frame::new(Command::Message)
        .with_header(headers::DESTINATION, destination)
        .with_header(headers::MESSAGE_ID, "m-1")
        .with_body(body.to_owned())
}

impl ScriptedDriver {
    fn answer(&mut self, frame: &Frame) {
        match (frame.command, frame.destination()) {
            (Command::Connect, _) => self
                .inbound
                .push_back(Frame::new(Command::Connected).with_header(headers::SESSION, "s-1")),
            (Command::Send, Some("/app/request")) => {
                self.inbound.push_back(reply("/reservation/request", CONFIRMED));
            },
            (Command::Send, Some("/app/lookup")) => {
                let body: serde_json::Value =
                    serde_json::from_slice(&frame.body).unwrap_or_default();
                let answer = match body["reservationId"].as_str() {
                    Some("R1") => DETAILS,
                    Some("bad") => "not json",
                    _ => "{}",
                };
                self.inbound.push_back(reply("/reservation/lookup", answer));
            },
            (Command::Disconnect, _) => self.connected = false,
            _ => {},
        }
    }
}

impl Driver for ScriptedDriver {
    type Error = io::Error;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        self.polls += 1;
        if self.drop_link_at == Some(self.polls) {
            self.connected = false;
            self.inbound.clear();
        }

        Ok(match self.keys.pop_front() {
            Some(key) => self.input.handle_key(key, app),
            None => vec![AppAction::Quit],
        })
    }

    async fn send_frame(&mut self, frame: Frame) -> Result<(), Self::Error> {
        if !self.connected {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "link closed"));
        }
        self.answer(&frame);
        let _ = self.sent.send(frame);
        Ok(())
    }

    async fn recv_frame(&mut self) -> Option<Frame> {
        self.inbound.pop_front()
    }

    async fn connect(&mut self, _addr: &str) -> Result<(), Self::Error> {
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let _ = self.renders.send(Snapshot::of(app));
        Ok(())
    }

    fn stop(&mut self) {
        self.connected = false;
    }
}

fn typed(text: &str) -> impl Iterator<Item = KeyInput> + '_ {
    text.chars().map(KeyInput::Char)
}

fn tabs(n: usize) -> impl Iterator<Item = KeyInput> {
    std::iter::repeat_n(KeyInput::Tab, n)
}

fn summary(frames: &[Frame]) -> Vec<(Command, Option<&str>)> {
    frames.iter().map(|f| (f.command, f.destination())).collect()
}

#[tokio::test]
async fn lookup_round_trip() {
    let keys = tabs(9).chain(typed("R1")).chain([KeyInput::Enter, KeyInput::Esc]);
    let (driver, mut recording) = scripted(keys.collect::<Vec<_>>());

    Runtime::new(driver, "broker:61613".into(), SessionConfig::default())
        .run()
        .await
        .expect("runtime should exit cleanly");

    assert_eq!(summary(&recording.frames()), [
        (Command::Connect, None),
        (Command::Subscribe, Some("/reservation/request")),
        (Command::Subscribe, Some("/reservation/lookup")),
        (Command::Send, Some("/app/lookup")),
        (Command::Disconnect, None),
    ]);

    let last = recording.snapshots().pop().expect("at least one render");
    assert_eq!(last.connection, ConnectionState::Connected { session: Some("s-1".into()) });
    assert!(last.lookup.contains(&"Daily price: $50".to_owned()));
}

#[tokio::test]
async fn submit_is_inert_until_form_complete() {
    let keys = typed("Boston").chain(tabs(8)).chain([KeyInput::Enter, KeyInput::Esc]);
    let (driver, mut recording) = scripted(keys.collect::<Vec<_>>());

    Runtime::new(driver, "broker:61613".into(), SessionConfig::default())
        .run()
        .await
        .expect("runtime should exit cleanly");

    let frames = recording.frames();
    assert!(frames.iter().all(|f| f.command != Command::Send));
    assert!(recording.snapshots().iter().all(|s| !s.submit_enabled));
}

#[tokio::test]
async fn complete_form_reserves_a_vehicle() {
    let keys = tabs(8).chain([KeyInput::Enter, KeyInput::Esc]);
    let (driver, mut recording) = scripted(keys.collect::<Vec<_>>());

    let mut runtime = Runtime::new(driver, "broker:61613".into(), SessionConfig::default());
    for field in FormField::ALL {
        let _ = runtime.app_mut().set_field(field, "1234567890123456");
    }
    assert!(runtime.app().submit_enabled());
    runtime.run().await.expect("runtime should exit cleanly");

    let frames = recording.frames();
    let send = frames
        .iter()
        .find(|f| f.destination() == Some("/app/request"))
        .expect("reservation should be sent");
    let body: serde_json::Value = serde_json::from_slice(&send.body).expect("json body");
    assert_eq!(body["creditCardNumber"], "1234-5678-9012-3456");
    assert_eq!(body["city"], "1234567890123456");

    let last = recording.snapshots().pop().expect("at least one render");
    assert_eq!(last.reservation, [
        "Confirmation Number: R1",
        "Vehicle address: 12 Main, X Y, 00001"
    ]);
}

#[tokio::test]
async fn malformed_reply_leaves_app_usable() {
    let keys = tabs(9)
        .chain(typed("bad"))
        .chain([KeyInput::Enter])
        .chain(std::iter::repeat_n(KeyInput::Backspace, 3))
        .chain(typed("R1"))
        .chain([KeyInput::Enter, KeyInput::Esc]);
    let (driver, mut recording) = scripted(keys.collect::<Vec<_>>());

    Runtime::new(driver, "broker:61613".into(), SessionConfig::default())
        .run()
        .await
        .expect("runtime should exit cleanly");

    let snapshots = recording.snapshots();
    assert!(
        snapshots
            .iter()
            .any(|s| s.status.as_deref().is_some_and(|m| m.starts_with("Error: undecodable")))
    );
    let last = snapshots.last().expect("at least one render");
    assert_eq!(last.lookup.first().map(String::as_str), Some("Reservation Owner: A B"));
}

#[tokio::test]
async fn unknown_reservation_shows_invalid_notice() {
    let keys = tabs(10).chain([KeyInput::Enter, KeyInput::Esc]);
    let (driver, mut recording) = scripted(keys.collect::<Vec<_>>());

    Runtime::new(driver, "broker:61613".into(), SessionConfig::default())
        .run()
        .await
        .expect("runtime should exit cleanly");

    let last = recording.snapshots().pop().expect("at least one render");
    assert_eq!(last.lookup, ["Invalid reservation number"]);
}

#[tokio::test]
async fn submit_after_link_loss_reports_not_connected() {
    let keys = tabs(8).chain([KeyInput::Enter, KeyInput::Esc]);
    let (mut driver, mut recording) = scripted(keys.collect::<Vec<_>>());
    driver.drop_link_at = Some(2);

    let mut runtime = Runtime::new(driver, "broker:61613".into(), SessionConfig::default());
    for field in FormField::ALL {
        let _ = runtime.app_mut().set_field(field, "x");
    }
    runtime.run().await.expect("runtime should exit cleanly");

    assert_eq!(summary(&recording.frames()), [
        (Command::Connect, None),
        (Command::Subscribe, Some("/reservation/request")),
        (Command::Subscribe, Some("/reservation/lookup")),
    ]);

    let snapshots = recording.snapshots();
    assert!(snapshots.iter().any(|s| {
        s.status.as_deref() == Some("Disconnected: connection closed by server")
    }));
    let last = snapshots.last().expect("at least one render");
    assert_eq!(last.connection, ConnectionState::Disconnected);
    assert_eq!(last.status.as_deref(), Some("Error: not connected"));
}
