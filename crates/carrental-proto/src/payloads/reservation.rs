//! New-reservation payload types.
//!
//! The client asks whether a vehicle of a given classification is available
//! in a city for a date range; the server answers with either a confirmation
//! (reservation id plus the vehicle's address) or `available: false`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Reservation request published on `/app/request`.
///
/// All fields are sent as entered. `start`/`end` are whatever date text the
/// form produced, and the card number keeps its display separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    /// Pick-up city.
    pub city: String,
    /// Vehicle category code.
    pub classification: String,
    /// Start date.
    pub start: String,
    /// End date.
    pub end: String,
    /// Customer first name.
    pub first_name: String,
    /// Customer last name.
    pub last_name: String,
    /// Customer identifier.
    pub customer_id: String,
    /// Card number, display-formatted.
    pub credit_card_number: String,
}

/// Address of the lot holding the assigned vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleAddress {
    /// House number.
    #[serde(deserialize_with = "lenient::text")]
    pub street_number: String,
    /// Street name.
    pub street_name: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal code.
    #[serde(deserialize_with = "lenient::text")]
    pub zip_code: String,
}

impl fmt::Display for VehicleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}, {}",
            self.street_number, self.street_name, self.city, self.state, self.zip_code
        )
    }
}

/// Address fields as they appear flat in a response body.
///
/// Each field may be absent, null, a string or a number.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressFields {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    street_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    street_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    city: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    state: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    zip_code: Option<String>,
}

impl AddressFields {
    /// `None` when no field carries a value. Otherwise the missing fields
    /// read as empty text and the rest are kept.
    fn into_address(self) -> Option<VehicleAddress> {
        let Self { street_number, street_name, city, state, zip_code } = self;
        if [&street_number, &street_name, &city, &state, &zip_code].iter().all(|f| f.is_none()) {
            return None;
        }

        Some(VehicleAddress {
            street_number: street_number.unwrap_or_default(),
            street_name: street_name.unwrap_or_default(),
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
            zip_code: zip_code.unwrap_or_default(),
        })
    }
}

/// Decode the flattened address of a response.
///
/// A field holding a JSON container is a decode error rather than a missing
/// address.
pub(super) fn flat_address<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<VehicleAddress>, D::Error> {
    AddressFields::deserialize(d).map(AddressFields::into_address)
}

/// Availability answer delivered on `/reservation/request`.
///
/// # Invariants
///
/// `reservation_id` and `address` are meaningful only when `available` is
/// true. Address fields are flat on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    /// Whether a vehicle was reserved.
    pub available: bool,
    /// Confirmation number.
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reservation_id: Option<String>,
    /// Vehicle location.
    #[serde(flatten, deserialize_with = "flat_address")]
    pub address: Option<VehicleAddress>,
}

impl ReservationResponse {
    /// Confirmed reservation.
    pub fn confirmed(reservation_id: impl Into<String>, address: VehicleAddress) -> Self {
        Self {
            available: true,
            reservation_id: Some(reservation_id.into()),
            address: Some(address),
        }
    }

    /// No matching vehicle.
    pub fn unavailable() -> Self {
        Self { available: false, reservation_id: None, address: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_street() -> VehicleAddress {
        VehicleAddress {
            street_number: "12".into(),
            street_name: "Main".into(),
            city: "X".into(),
            state: "Y".into(),
            zip_code: "00001".into(),
        }
    }

    #[test]
    fn request_uses_camel_case_keys() {
        let request = ReservationRequest {
            city: "Boston".into(),
            classification: "SUV".into(),
            start: "2024-01-01".into(),
            end: "2024-01-05".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            customer_id: "C42".into(),
            credit_card_number: "1234-5678".into(),
        };

        let value = serde_json::to_value(&request).expect("should serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "city": "Boston",
                "classification": "SUV",
                "start": "2024-01-01",
                "end": "2024-01-05",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "customerId": "C42",
                "creditCardNumber": "1234-5678",
            })
        );
    }

    #[test]
    fn decode_confirmation() {
        let json = r#"{"available":true,"reservationId":"R1","streetNumber":"12",
            "streetName":"Main","city":"X","state":"Y","zipCode":"00001"}"#;

        let response: ReservationResponse = serde_json::from_str(json).expect("should decode");
        assert_eq!(response, ReservationResponse::confirmed("R1", main_street()));
    }

    #[test]
    fn decode_unavailable_without_address() {
        let response: ReservationResponse =
            serde_json::from_str(r#"{"available":false}"#).expect("should decode");
        assert_eq!(response, ReservationResponse::unavailable());
    }

    #[test]
    fn numeric_identifiers_become_text() {
        let json = r#"{"available":true,"reservationId":1001,"streetNumber":12,
            "streetName":"Main","city":"X","state":"Y","zipCode":1}"#;

        let response: ReservationResponse = serde_json::from_str(json).expect("should decode");
        assert_eq!(response.reservation_id.as_deref(), Some("1001"));
        let address = response.address.expect("address present");
        assert_eq!(address.street_number, "12");
        assert_eq!(address.zip_code, "1");
    }

    #[test]
    fn null_address_field_keeps_the_rest() {
        let json = r#"{"available":true,"reservationId":"R1","streetNumber":"12",
            "streetName":"Main","city":"X","state":"Y","zipCode":null}"#;

        let response: ReservationResponse = serde_json::from_str(json).expect("should decode");
        assert_eq!(
            response.address,
            Some(VehicleAddress { zip_code: String::new(), ..main_street() })
        );
    }

    #[test]
    fn container_in_address_field_is_rejected() {
        let json = r#"{"available":true,"reservationId":"R1","streetNumber":"12",
            "streetName":"Main","city":{"name":"X"},"state":"Y","zipCode":"00001"}"#;

        assert!(serde_json::from_str::<ReservationResponse>(json).is_err());
    }

    #[test]
    fn missing_available_is_rejected() {
        let result = serde_json::from_str::<ReservationResponse>(r#"{"reservationId":"R1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn address_display_matches_confirmation_text() {
        assert_eq!(main_street().to_string(), "12 Main, X Y, 00001");
    }
}
