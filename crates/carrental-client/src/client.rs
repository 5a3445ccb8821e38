//! Client state machine.
//!
//! The `Client` owns the channel session, the two response subscriptions and
//! one request slot per [`RequestKind`]. Responses carry no correlation id, so
//! a slot only tracks whether an answer is outstanding.

use std::fmt;

use carrental_proto::{
    Command, Destination, Frame, Payload, headers,
    payloads::{lookup::LookupRequest, reservation::ReservationRequest},
};

use crate::{
    display::Outcome,
    error::ClientError,
    event::{ClientAction, ClientEvent, LogLevel},
};

/// Protocol version offered in CONNECT.
const ACCEPT_VERSION: &str = "1.2";

/// Heart-beating is off in both directions.
const HEART_BEAT: &str = "0,0";

/// Acknowledgement mode for both subscriptions.
const ACK_MODE: &str = "auto";

/// The two request/response exchanges the client supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// New reservation.
    Reservation,
    /// Reservation lookup.
    Lookup,
}

impl RequestKind {
    /// Both kinds, in subscription order.
    pub const ALL: [Self; 2] = [Self::Reservation, Self::Lookup];

    /// Destination requests of this kind are published on.
    pub const fn request_destination(self) -> Destination {
        match self {
            Self::Reservation => Destination::ReservationRequest,
            Self::Lookup => Destination::LookupRequest,
        }
    }

    /// Destination answers of this kind arrive on.
    pub const fn response_destination(self) -> Destination {
        match self {
            Self::Reservation => Destination::ReservationResponse,
            Self::Lookup => Destination::LookupResponse,
        }
    }

    /// Kind answered on `destination`. `None` for outbound destinations.
    pub const fn for_response(destination: Destination) -> Option<Self> {
        match destination {
            Destination::ReservationResponse => Some(Self::Reservation),
            Destination::LookupResponse => Some(Self::Lookup),
            Destination::ReservationRequest | Destination::LookupRequest => None,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reservation => f.write_str("reservation"),
            Self::Lookup => f.write_str("lookup"),
        }
    }
}

/// Request slot state.
///
/// `Idle → AwaitingResponse` on send, `AwaitingResponse → Idle` when any
/// message arrives on the matching subscription. There is no timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No answer outstanding.
    #[default]
    Idle,
    /// A request was sent and its answer has not arrived.
    AwaitingResponse,
}

/// Channel session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session.
    #[default]
    Disconnected,
    /// CONNECT sent, waiting for CONNECTED.
    Connecting,
    /// Session established and subscriptions sent.
    Connected {
        /// Server-assigned session id.
        session: Option<String>,
    },
}

/// Active subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Subscription id echoed in MESSAGE `subscription` headers.
    pub id: String,
    /// Subscribed destination.
    pub destination: Destination,
}

/// Reservation protocol client.
#[derive(Debug, Default)]
pub struct Client {
    session: SessionState,
    reservation: RequestState,
    lookup: RequestState,
    subscriptions: Vec<Subscription>,
}

impl Client {
    /// Create a disconnected client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether the session is established.
    pub fn is_connected(&self) -> bool {
        matches!(self.session, SessionState::Connected { .. })
    }

    /// State of the request slot for `kind`.
    pub fn request_state(&self, kind: RequestKind) -> RequestState {
        match kind {
            RequestKind::Reservation => self.reservation,
            RequestKind::Lookup => self.lookup,
        }
    }

    /// Active subscriptions.
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Process an event and return resulting actions.
    ///
    /// # Errors
    ///
    /// - `ClientError::NotConnected` for sends before CONNECTED
    /// - `ClientError::Decode` for a response body that does not parse
    /// - `ClientError::UnexpectedDestination` for a MESSAGE on an unknown route
    /// - `ClientError::UnexpectedFrame` for client-only commands
    /// - `ClientError::Server` for an ERROR frame
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::Connect { host, login, passcode } => {
                Ok(self.handle_connect(host, login, passcode))
            },
            ClientEvent::FrameReceived(frame) => self.handle_frame(frame),
            ClientEvent::SendReservation(request) => {
                self.handle_send(RequestKind::Reservation, Payload::ReservationRequest(request))
            },
            ClientEvent::SendLookup { reservation_id } => self.handle_send(
                RequestKind::Lookup,
                Payload::LookupRequest(LookupRequest { reservation_id }),
            ),
            ClientEvent::Disconnect => Ok(self.handle_disconnect()),
        }
    }

    /// Convenience wrapper for [`ClientEvent::SendReservation`].
    ///
    /// # Errors
    ///
    /// Same as [`Client::handle`].
    pub fn send_reservation(
        &mut self,
        request: ReservationRequest,
    ) -> Result<Vec<ClientAction>, ClientError> {
        self.handle(ClientEvent::SendReservation(request))
    }

    /// Convenience wrapper for [`ClientEvent::SendLookup`].
    ///
    /// # Errors
    ///
    /// Same as [`Client::handle`].
    pub fn send_lookup(
        &mut self,
        reservation_id: impl Into<String>,
    ) -> Result<Vec<ClientAction>, ClientError> {
        self.handle(ClientEvent::SendLookup { reservation_id: reservation_id.into() })
    }

    fn handle_connect(
        &mut self,
        host: String,
        login: Option<String>,
        passcode: Option<String>,
    ) -> Vec<ClientAction> {
        let mut frame = Frame::new(Command::Connect)
            .with_header(headers::ACCEPT_VERSION, ACCEPT_VERSION)
            .with_header(headers::HOST, host);
        if let Some(login) = login {
            frame = frame.with_header(headers::LOGIN, login);
        }
        if let Some(passcode) = passcode {
            frame = frame.with_header(headers::PASSCODE, passcode);
        }
        let frame = frame.with_header(headers::HEART_BEAT, HEART_BEAT);

        self.session = SessionState::Connecting;
        self.subscriptions.clear();

        vec![ClientAction::Send(frame)]
    }

    fn handle_disconnect(&mut self) -> Vec<ClientAction> {
        let was_open = self.session != SessionState::Disconnected;
        self.reset();

        if was_open { vec![ClientAction::Send(Frame::new(Command::Disconnect))] } else { vec![] }
    }

    fn handle_send(
        &mut self,
        kind: RequestKind,
        payload: Payload,
    ) -> Result<Vec<ClientAction>, ClientError> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }

        let frame = payload.into_frame()?;
        let mut actions = Vec::with_capacity(2);

        let slot = self.slot_mut(kind);
        if *slot == RequestState::AwaitingResponse {
            actions.push(ClientAction::Log {
                level: LogLevel::Warn,
                message: format!(
                    "{kind} request sent while a previous one is unanswered; responses cannot be told apart"
                ),
            });
        }
        *slot = RequestState::AwaitingResponse;

        actions.push(ClientAction::Send(frame));
        Ok(actions)
    }

    fn handle_frame(&mut self, frame: Frame) -> Result<Vec<ClientAction>, ClientError> {
        match frame.command {
            Command::Connected => Ok(self.handle_connected(&frame)),
            Command::Message => self.handle_message(&frame),
            Command::Receipt => Ok(vec![]),
            Command::Error => {
                let message = frame
                    .header(headers::MESSAGE)
                    .map(str::to_owned)
                    .unwrap_or_else(|| String::from_utf8_lossy(&frame.body).trim().to_owned());
                self.reset();
                Err(ClientError::Server { message })
            },
            command => Err(ClientError::UnexpectedFrame { command }),
        }
    }

    fn handle_connected(&mut self, frame: &Frame) -> Vec<ClientAction> {
        let mut actions = Vec::with_capacity(3);

        if self.session != SessionState::Connecting {
            actions.push(ClientAction::Log {
                level: LogLevel::Warn,
                message: format!("CONNECTED received in state {:?}", self.session),
            });
        }

        let session = frame.header(headers::SESSION).map(str::to_owned);
        self.session = SessionState::Connected { session: session.clone() };

        actions.push(ClientAction::Connected {
            version: frame.header(headers::VERSION).map(str::to_owned),
            session,
            server: frame.header(headers::SERVER).map(str::to_owned),
        });

        self.subscriptions = RequestKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| Subscription {
                id: format!("sub-{i}"),
                destination: kind.response_destination(),
            })
            .collect();

        actions.extend(self.subscriptions.iter().map(|sub| {
            ClientAction::Send(
                Frame::new(Command::Subscribe)
                    .with_header(headers::ID, sub.id.clone())
                    .with_header(headers::DESTINATION, sub.destination.path())
                    .with_header(headers::ACK, ACK_MODE),
            )
        }));

        actions
    }

    fn handle_message(&mut self, frame: &Frame) -> Result<Vec<ClientAction>, ClientError> {
        let destination = self.route(frame)?;
        let kind = RequestKind::for_response(destination)
            .ok_or_else(|| ClientError::UnexpectedDestination(destination.path().to_owned()))?;

        let unsolicited = std::mem::take(self.slot_mut(kind)) == RequestState::Idle;

        let payload = Payload::decode(destination, &frame.body)
            .map_err(|e| ClientError::Decode { destination, reason: e.to_string() })?;

        let mut actions = Vec::with_capacity(2);
        if unsolicited {
            actions.push(ClientAction::Log {
                level: LogLevel::Debug,
                message: format!("{kind} response with no request outstanding"),
            });
        }

        let outcome = match payload {
            Payload::ReservationResponse(response) => Outcome::from_reservation(response),
            Payload::LookupResponse(response) => Outcome::from_lookup(response),
            Payload::ReservationRequest(_) | Payload::LookupRequest(_) => {
                return Err(ClientError::UnexpectedDestination(destination.path().to_owned()));
            },
        };

        actions.push(ClientAction::Display(outcome));
        Ok(actions)
    }

    /// Resolve the destination of a MESSAGE.
    ///
    /// The `destination` header wins. Brokers that omit it are matched through
    /// the `subscription` header.
    fn route(&self, frame: &Frame) -> Result<Destination, ClientError> {
        if let Some(path) = frame.destination() {
            return path.parse().map_err(|_| ClientError::UnexpectedDestination(path.to_owned()));
        }

        let id = frame.header(headers::SUBSCRIPTION).unwrap_or_default();
        self.subscriptions
            .iter()
            .find(|sub| sub.id == id)
            .map(|sub| sub.destination)
            .ok_or_else(|| ClientError::UnexpectedDestination(format!("subscription {id:?}")))
    }

    fn slot_mut(&mut self, kind: RequestKind) -> &mut RequestState {
        match kind {
            RequestKind::Reservation => &mut self.reservation,
            RequestKind::Lookup => &mut self.lookup,
        }
    }

    fn reset(&mut self) {
        self.session = SessionState::Disconnected;
        self.reservation = RequestState::Idle;
        self.lookup = RequestState::Idle;
        self.subscriptions.clear();
    }
}
