//! Observable application state types.
//!
//! This module defines the data structures that represent the application's
//! current view of the world: the connection and the latest answer to each
//! request kind.
//!
//! These structures serve as the "View Model" for the application. Notices
//! own their presentation text so every frontend shows the same wording.

use carrental_client::{LookupResponse, ReservationResponse, VehicleAddress};

/// Connection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected to server.
    Disconnected,
    /// Transport open, waiting for the session handshake.
    Connecting,
    /// Connected with established session.
    Connected {
        /// Server-assigned session id, when the server sends one.
        session: Option<String>,
    },
}

/// Latest answer to a reservation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationNotice {
    /// A vehicle was reserved.
    Confirmed {
        /// Confirmation number.
        reservation_id: String,
        /// Vehicle location.
        address: Option<VehicleAddress>,
    },
    /// No vehicle matched.
    Unavailable,
}

impl ReservationNotice {
    /// Notice for a confirmation.
    pub fn confirmed(response: ReservationResponse) -> Self {
        Self::Confirmed {
            reservation_id: response.reservation_id.unwrap_or_default(),
            address: response.address,
        }
    }

    /// Presentation text, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Confirmed { reservation_id, address } => vec![
                format!("Confirmation Number: {reservation_id}"),
                format!("Vehicle address: {}", address_text(address.as_ref())),
            ],
            Self::Unavailable => vec![
                "There are no cars available with your requirements. Please search again."
                    .to_owned(),
            ],
        }
    }
}

/// Latest answer to a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupNotice {
    /// The reservation exists.
    Details(LookupResponse),
    /// No reservation with that id.
    InvalidReservationId,
}

impl LookupNotice {
    /// Presentation text, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Details(details) => {
                let text = |v: &Option<String>| v.as_deref().unwrap_or_default().to_owned();
                let price = details.daily_price.map(|p| p.to_string()).unwrap_or_default();

                vec![
                    format!(
                        "Reservation Owner: {} {}",
                        text(&details.first_name),
                        text(&details.last_name)
                    ),
                    format!("From: {}", text(&details.start)),
                    format!("To: {}", text(&details.end)),
                    format!("Vehicle: {} {}", text(&details.manufacturer), text(&details.model)),
                    format!("Daily price: ${price}"),
                    format!("Vehicle address: {}", address_text(details.address.as_ref())),
                ]
            },
            Self::InvalidReservationId => vec!["Invalid reservation number".to_owned()],
        }
    }
}

fn address_text(address: Option<&VehicleAddress>) -> String {
    address.map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> VehicleAddress {
        VehicleAddress {
            street_number: "12".into(),
            street_name: "Main".into(),
            city: "X".into(),
            state: "Y".into(),
            zip_code: "00001".into(),
        }
    }

    #[test]
    fn confirmation_text() {
        let notice = ReservationNotice::confirmed(ReservationResponse::confirmed("R1", address()));
        assert_eq!(notice.lines(), [
            "Confirmation Number: R1",
            "Vehicle address: 12 Main, X Y, 00001",
        ]);
    }

    #[test]
    fn details_text() {
        let notice = LookupNotice::Details(LookupResponse {
            start: Some("2024-01-01".into()),
            end: Some("2024-01-05".into()),
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            manufacturer: Some("M".into()),
            model: Some("S".into()),
            daily_price: Some(49.5),
            address: Some(address()),
        });

        assert_eq!(notice.lines(), [
            "Reservation Owner: A B",
            "From: 2024-01-01",
            "To: 2024-01-05",
            "Vehicle: M S",
            "Daily price: $49.5",
            "Vehicle address: 12 Main, X Y, 00001",
        ]);
    }

    #[test]
    fn whole_dollar_price_has_no_fraction() {
        let notice = LookupNotice::Details(LookupResponse {
            start: Some("s".into()),
            daily_price: Some(50.0),
            ..LookupResponse::default()
        });
        assert!(notice.lines().contains(&"Daily price: $50".to_owned()));
    }

    #[test]
    fn negative_notices() {
        assert_eq!(ReservationNotice::Unavailable.lines(), [
            "There are no cars available with your requirements. Please search again."
        ]);
        assert_eq!(LookupNotice::InvalidReservationId.lines(), ["Invalid reservation number"]);
    }
}
