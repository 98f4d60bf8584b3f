// ABOUTME: Explicit search-request validators returning structured violation lists
// ABOUTME: Invoked by callers before a request reaches the client core
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request validation.
//!
//! The client core assumes its invariants hold (adults >= 1,
//! adults + children <= 9, infants <= adults, departure <= return). These
//! functions make the checks explicit for the calling layer and return every
//! violation at once rather than failing on the first.

use crate::models::{FlightOfferSearch, LocationSearch};

/// One violated constraint on a search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending request field
    pub field: &'static str,
    /// Why the value is rejected
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check every invariant of a flight search; empty means valid
#[must_use]
pub fn validate_flight_search(request: &FlightOfferSearch) -> Vec<Violation> {
    let mut violations = Vec::new();

    if request.adults == 0 {
        violations.push(Violation::new("adults", "at least one adult is required"));
    }
    // Widen before adding; the sum can exceed u32 for hostile inputs.
    if u64::from(request.adults) + u64::from(request.children) > 9 {
        violations.push(Violation::new(
            "children",
            "the total number of seated travelers cannot exceed 9",
        ));
    }
    if request.infants > request.adults {
        violations.push(Violation::new(
            "infants",
            "the number of infants cannot exceed the number of adults",
        ));
    }
    if let Some(return_date) = request.return_date {
        if request.departure_date > return_date {
            violations.push(Violation::new(
                "returnDate",
                "the return date cannot be before the departure date",
            ));
        }
    }

    violations
}

/// Check every invariant of a location search; empty means valid
#[must_use]
pub fn validate_location_search(search: &LocationSearch) -> Vec<Violation> {
    let mut violations = Vec::new();

    if search.keyword.trim().is_empty() {
        violations.push(Violation::new("keyword", "a search keyword is required"));
    }
    if search.sub_type.trim().is_empty() {
        violations.push(Violation::new("subType", "a location subtype is required"));
    }

    violations
}
