//! Reservation form values.

use carrental_client::ReservationRequest;

use crate::FormField;

/// Current text of every reservation field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    values: [String; FormField::COUNT],
}

impl ReservationForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`.
    pub fn get(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: FormField, value: String) {
        self.values[field.index()] = value;
    }

    /// Build the outbound request from the current values.
    ///
    /// Values are sent as entered. Returns `None` while any field is blank.
    pub fn to_request(&self) -> Option<ReservationRequest> {
        if self.values.iter().any(|v| v.trim().is_empty()) {
            return None;
        }

        let value = |field: FormField| self.get(field).to_owned();

        Some(ReservationRequest {
            city: value(FormField::City),
            classification: value(FormField::Classification),
            start: value(FormField::Start),
            end: value(FormField::End),
            first_name: value(FormField::FirstName),
            last_name: value(FormField::LastName),
            customer_id: value(FormField::CustomerId),
            credit_card_number: value(FormField::CreditCardNumber),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_form_builds_nothing() {
        let mut form = ReservationForm::new();
        form.set(FormField::City, "Boston".into());
        assert_eq!(form.to_request(), None);
    }

    #[test]
    fn complete_form_maps_each_field() {
        let mut form = ReservationForm::new();
        for field in FormField::ALL {
            form.set(field, field.label().to_owned());
        }

        let request = form.to_request().expect("complete");
        assert_eq!(request.city, "City");
        assert_eq!(request.start, "Start date");
        assert_eq!(request.customer_id, "Customer ID");
        assert_eq!(request.credit_card_number, "Credit card number");
    }
}
