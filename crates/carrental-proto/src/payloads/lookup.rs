//! Reservation lookup payload types.

use serde::{Deserialize, Serialize};

use super::{
    lenient,
    reservation::{VehicleAddress, flat_address},
};

/// Lookup request published on `/app/lookup`.
///
/// The identifier is customer-supplied and unconstrained; it may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    /// Reservation to look up.
    pub reservation_id: String,
}

/// Lookup answer delivered on `/reservation/lookup`.
///
/// There is no separate "found" flag: a null or absent `start` means the
/// reservation does not exist, and every other field is then meaningless.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    /// Start date; doubles as the validity flag.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub start: Option<String>,
    /// End date.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub end: Option<String>,
    /// Reservation owner first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Reservation owner last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Vehicle manufacturer.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Vehicle model.
    #[serde(default)]
    pub model: Option<String>,
    /// Price per day.
    #[serde(default)]
    pub daily_price: Option<f64>,
    /// Vehicle location.
    #[serde(flatten, deserialize_with = "flat_address")]
    pub address: Option<VehicleAddress>,
}

impl LookupResponse {
    /// Whether the server found the reservation.
    pub fn is_found(&self) -> bool {
        self.start.is_some()
    }

    /// Answer for an unknown reservation id.
    pub fn not_found() -> Self {
        Self::default()
    }
}
