//! Request gate.
//!
//! A reservation may only be sent once every required field holds a
//! non-blank value. The gate keeps one readiness flag per [`FormField`] and
//! recomputes the aggregate on demand. Contents are never validated beyond
//! blankness.

use std::fmt;

/// The eight required reservation fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    /// Pick-up city.
    City,
    /// Vehicle category code.
    Classification,
    /// Start date.
    Start,
    /// End date.
    End,
    /// Customer first name.
    FirstName,
    /// Customer last name.
    LastName,
    /// Customer identifier.
    CustomerId,
    /// Card number.
    CreditCardNumber,
}

impl FormField {
    /// Number of required fields.
    pub const COUNT: usize = 8;

    /// All fields in form order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::City,
        Self::Classification,
        Self::Start,
        Self::End,
        Self::FirstName,
        Self::LastName,
        Self::CustomerId,
        Self::CreditCardNumber,
    ];

    /// Position in [`FormField::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::Classification => "Classification",
            Self::Start => "Start date",
            Self::End => "End date",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::CustomerId => "Customer ID",
            Self::CreditCardNumber => "Credit card number",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Readiness flags for the required fields.
///
/// # Invariants
///
/// - Every flag starts not-ready.
/// - A flag reflects only the last value seen for its field.
/// - [`RequestGate::is_ready`] is true iff all flags are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGate {
    ready: [bool; FormField::COUNT],
}

impl RequestGate {
    /// Gate with every field not-ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest value of `field`. Whitespace-only counts as empty.
    pub fn on_field_changed(&mut self, field: FormField, raw: &str) {
        self.ready[field.index()] = !raw.trim().is_empty();
    }

    /// Whether every required field is filled.
    pub fn is_ready(&self) -> bool {
        self.ready.iter().all(|&ready| ready)
    }

    /// Whether `field` is filled.
    pub fn is_field_ready(&self, field: FormField) -> bool {
        self.ready[field.index()]
    }

    /// Fields still blank, in form order.
    pub fn missing(&self) -> impl Iterator<Item = FormField> + '_ {
        FormField::ALL.into_iter().filter(|field| !self.is_field_ready(*field))
    }
}
